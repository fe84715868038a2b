use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{MicroProverError, Result};
use crate::pow::HASH_MOD;

// nonce生成策略
// 三个历史版本的策略都保留在这里，通过配置按名称选择，默认为随机抽取
pub trait NoncePolicy {
    // 本轮搜索的初始nonce
    fn first(&mut self) -> u32;

    // 根据当前nonce推进到下一个候选值
    fn next(&mut self, current: u32) -> u32;
}

// 预先洗牌的全排列策略
// target > 0 时至多256次尝试内必然命中，耗尽后循环重放
pub struct ShuffledPermutation {
    order: Vec<u32>,
    pos: usize,
}

impl ShuffledPermutation {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let mut order: Vec<u32> = (0..HASH_MOD).collect();
        order.shuffle(&mut rng);
        ShuffledPermutation { order, pos: 0 }
    }

    fn advance(&mut self) -> u32 {
        let nonce = self.order[self.pos % self.order.len()];
        self.pos += 1;
        nonce
    }
}

impl NoncePolicy for ShuffledPermutation {
    fn first(&mut self) -> u32 {
        self.advance()
    }

    fn next(&mut self, _current: u32) -> u32 {
        self.advance()
    }
}

// 每次尝试重新均匀抽取的策略（保留版本的行为，从0起步）
pub struct RandomDraw {
    rng: StdRng,
}

impl RandomDraw {
    pub fn new() -> Self {
        RandomDraw {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomDraw {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoncePolicy for RandomDraw {
    fn first(&mut self) -> u32 {
        0
    }

    fn next(&mut self, _current: u32) -> u32 {
        self.rng.gen_range(0..HASH_MOD)
    }
}

// 随机步长游走策略：在 [0, 256) 的残差空间内环绕前进
pub struct RandomWalk {
    rng: StdRng,
}

impl RandomWalk {
    pub fn new() -> Self {
        RandomWalk {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomWalk {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoncePolicy for RandomWalk {
    fn first(&mut self) -> u32 {
        self.rng.gen_range(0..HASH_MOD)
    }

    fn next(&mut self, current: u32) -> u32 {
        let step = self.rng.gen_range(1..HASH_MOD);
        (current + step) % HASH_MOD
    }
}

// 固定序列策略，供测试注入确定性的nonce序列
pub struct ScriptedNonces {
    seq: Vec<u32>,
    pos: usize,
}

impl ScriptedNonces {
    pub fn new(seq: Vec<u32>) -> Self {
        ScriptedNonces { seq, pos: 0 }
    }

    fn advance(&mut self) -> u32 {
        let nonce = self.seq[self.pos % self.seq.len()];
        self.pos += 1;
        nonce
    }
}

impl NoncePolicy for ScriptedNonces {
    fn first(&mut self) -> u32 {
        self.advance()
    }

    fn next(&mut self, _current: u32) -> u32 {
        self.advance()
    }
}

// 配置中可用的策略名称
pub const POLICY_NAMES: [&str; 3] = ["random", "permutation", "walk"];

pub fn is_known_policy(name: &str) -> bool {
    POLICY_NAMES.contains(&name)
}

// 按配置名称构造nonce策略
pub fn from_name(name: &str) -> Result<Box<dyn NoncePolicy>> {
    match name {
        "random" => Ok(Box::new(RandomDraw::new())),
        "permutation" => Ok(Box::new(ShuffledPermutation::new())),
        "walk" => Ok(Box::new(RandomWalk::new())),
        other => Err(MicroProverError::Config(format!(
            "未知的nonce策略: {}",
            other
        ))),
    }
}
