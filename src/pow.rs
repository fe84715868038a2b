use rand::Rng;
use tracing::{debug, info};

use crate::bits::byte_to_bits;
use crate::device::{DisplaySurface, COLOR_BIT_CLEAR, COLOR_BIT_SET};
use crate::nonce::NoncePolicy;

// 模除数，决定"哈希"的位宽
pub const HASH_MOD: u32 = 256;

// 已解出的一轮工作量证明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    pub hash8: u8,
    pub block: u32,
    pub nonce: u32,
    pub attempts: u64,
}

pub struct ProofOfWork {
    target: u8,
    difficulty: u8,
}

impl ProofOfWork {
    // 根据难度推导8位目标值：target = 2^(hash_bits - difficulty)
    // 难度被钳制到 [1, hash_bits]，保证目标值严格为正
    pub fn new(difficulty: u8, hash_bits: u8) -> Self {
        let hash_bits = hash_bits.clamp(1, 8);
        let difficulty = difficulty.clamp(1, hash_bits);
        let target = 1u8 << (hash_bits - difficulty);
        debug!("难度: {}, 目标值: {:08b}", difficulty, target);
        ProofOfWork { target, difficulty }
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    // 简化的8位哈希，仅用于教学演示，不具备密码学强度
    pub fn hash_8bit(data: u64) -> u8 {
        (data % HASH_MOD as u64) as u8
    }

    pub fn check_hash(&self, hash8: u8) -> bool {
        hash8 < self.target
    }

    // 工作量证明搜索循环
    // 每次尝试都把哈希结果渲染到LED上，命中目标后返回解，
    // 否则按注入的nonce策略继续；不设尝试上限，
    // 期望尝试次数约为 256 / target
    pub fn search<D: DisplaySurface + ?Sized>(
        &self,
        block: u32,
        nonces: &mut dyn NoncePolicy,
        display: &mut D,
    ) -> Solution {
        let mut nonce = nonces.first();
        let mut attempts: u64 = 1;

        loop {
            let hash8 = Self::hash_8bit(block as u64 + nonce as u64);
            display_byte(display, hash8);

            if self.check_hash(hash8) {
                info!(
                    "找到解! 哈希: {:08b}, 区块: {}, nonce: {}, 尝试次数: {}",
                    hash8, block, nonce, attempts
                );
                return Solution {
                    hash8,
                    block,
                    nonce,
                    attempts,
                };
            }

            nonce = nonces.next(nonce);
            attempts += 1;

            if attempts % 100000 == 0 {
                debug!("尝试次数: {}, 当前nonce: {}", attempts, nonce);
            }
        }
    }
}

// 在LED环上渲染一个字节：像素1..=8，最高位在前
// 1位显示绿色，0位显示红色
pub fn display_byte<D: DisplaySurface + ?Sized>(display: &mut D, byte: u8) {
    for (i, bit) in byte_to_bits(byte).iter().enumerate() {
        let color = if *bit { COLOR_BIT_SET } else { COLOR_BIT_CLEAR };
        display.set_pixel(i + 1, color);
    }
    display.show();
}

// 随机抽取一个"区块"值，模拟一轮不可变的交易数据
pub fn random_block<R: Rng>(rng: &mut R) -> u32 {
    rng.gen_range(0..=u16::MAX as u32)
}
