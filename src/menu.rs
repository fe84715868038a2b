use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::device::{
    AudioSink, DisplaySurface, InputSource, COLOR_BLANK, COLOR_DIFFICULTY, SHAKE_THRESHOLD,
};
use crate::error::Result;
use crate::logger::{RunLogger, RunRecord};
use crate::narrator;
use crate::nonce;
use crate::pow::{self, ProofOfWork};

// 找到解时的提示音参数
const TONE_FREQ_HZ: f32 = 300.0;
const TONE_SECS: f32 = 0.5;

// 顶层控制循环的两个阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Selecting,
    Mining { difficulty: u8 },
}

// 顶层应用：难度选择 ⇄ 挖矿演示 的显式状态机
pub struct App<B> {
    board: B,
    config: Config,
    run: u64,
    sound_mode: bool,
    rng: StdRng,
}

impl<B: DisplaySurface + InputSource + AudioSink> App<B> {
    pub fn new(board: B, config: Config) -> Self {
        App {
            board,
            config,
            run: 1,
            sound_mode: false,
            rng: StdRng::from_entropy(),
        }
    }

    // 一直运行到观察到退出输入
    pub fn run(&mut self, logger: &mut RunLogger) -> Result<()> {
        let mut phase = Phase::Selecting;
        loop {
            phase = match phase {
                Phase::Selecting => match self.select_difficulty() {
                    Some(difficulty) => Phase::Mining { difficulty },
                    None => break,
                },
                Phase::Mining { difficulty } => match self.mine_once(difficulty, logger)? {
                    Some(next) => next,
                    None => break,
                },
            };
        }
        info!("退出演示");
        Ok(())
    }

    // 难度选择循环：每次轮询都重绘难度条
    // B键循环难度（到最大值后回绕到1），A键确认，
    // 摇晃手势切换语音模式；返回None表示观察到退出输入
    fn select_difficulty(&mut self) -> Option<u8> {
        let max = self.config.pow.hash_bits;
        let mut difficulty: u8 = 1;
        self.board.fill(COLOR_BLANK);

        loop {
            self.render_difficulty_bar(difficulty);

            let input = self.board.poll();
            if input.quit {
                return None;
            }

            if input.button_b {
                difficulty = if difficulty >= max { 1 } else { difficulty + 1 };
                debug!("难度调整为: {}", difficulty);
                if self.sound_mode {
                    narrator::read_difficulty(&mut self.board, difficulty);
                }
                // 去抖，避免一次按键引起连跳
                thread::sleep(Duration::from_millis(self.config.display.debounce_ms));
            }

            if input.button_a {
                info!("确认难度: {}", difficulty);
                return Some(difficulty);
            }

            // 单轴加速度超过阈值视为摇晃
            if input.acceleration[0].abs() > SHAKE_THRESHOLD {
                self.sound_mode = !self.sound_mode;
                info!("语音模式: {}", if self.sound_mode { "开" } else { "关" });
                self.board.play_tone(TONE_FREQ_HZ, TONE_SECS);
            }
        }
    }

    // 温度计式难度条：点亮difficulty个像素（从像素1起），其余熄灭
    fn render_difficulty_bar(&mut self, difficulty: u8) {
        let max = self.config.pow.hash_bits as usize;
        for i in 0..max {
            let color = if i < difficulty as usize {
                COLOR_DIFFICULTY
            } else {
                COLOR_BLANK
            };
            self.board.set_pixel(i + 1, color);
        }
        self.board.show();
    }

    // 单轮挖矿演示：搜索、播报、记录一条运行日志，
    // 然后把解留在LED上等待输入；返回下一阶段，None表示退出
    fn mine_once(&mut self, difficulty: u8, logger: &mut RunLogger) -> Result<Option<Phase>> {
        let pow = ProofOfWork::new(difficulty, self.config.pow.hash_bits);
        let mut nonces = nonce::from_name(&self.config.pow.nonce_policy)?;

        self.board.fill(COLOR_BLANK);
        self.board.show();

        let block = pow::random_block(&mut self.rng);
        info!(
            "开始第 {} 轮搜索, 目标值: {:08b}, 区块: {}",
            self.run,
            pow.target(),
            block
        );

        let solution = pow.search(block, nonces.as_mut(), &mut self.board);

        if self.sound_mode {
            self.board.play_tone(TONE_FREQ_HZ, TONE_SECS);
            narrator::read_solution(&mut self.board, solution.hash8);
        }

        logger.log_run(&RunRecord {
            run: self.run,
            target: pow.target(),
            hash8: solution.hash8,
            block: solution.block,
            nonce: solution.nonce,
            attempts: solution.attempts,
        });

        // 解保留在LED上：A重开一轮（同难度），B返回难度选择
        loop {
            let input = self.board.poll();
            if input.quit {
                return Ok(None);
            }
            if input.button_a {
                self.run += 1;
                return Ok(Some(Phase::Mining { difficulty }));
            }
            if input.button_b {
                self.run += 1;
                return Ok(Some(Phase::Selecting));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{InputState, MemoryBoard};
    use tempfile::tempdir;

    fn test_config() -> Config {
        let mut config = Config::default();
        // 全排列策略保证测试中的搜索至多256次尝试内结束
        config.pow.nonce_policy = "permutation".to_string();
        config.display.debounce_ms = 0;
        config
    }

    fn run_app(inputs: Vec<InputState>) -> (App<MemoryBoard>, Vec<String>) {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("pow_log.csv");

        let board = MemoryBoard::with_inputs(inputs);
        let mut app = App::new(board, test_config());
        let mut logger = RunLogger::new(&path);
        app.run(&mut logger).unwrap();

        let lines = std::fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect();
        (app, lines)
    }

    #[test]
    fn test_quit_during_selection_logs_nothing() {
        let (_, lines) = run_app(vec![InputState::exit()]);
        assert_eq!(lines.len(), 1, "Only the header should be written");
    }

    #[test]
    fn test_confirm_lowest_difficulty_runs_one_round() {
        // 确认难度1（目标128），脚本耗尽后在等待阶段退出
        let (_, lines) = run_app(vec![InputState::press_a()]);
        assert_eq!(lines.len(), 2);
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields[0], "1");
        assert_eq!(fields[1], "10000000");
    }

    #[test]
    fn test_difficulty_wraps_back_to_one() {
        // K=8：8次B按键从1绕回1，随后确认
        let mut inputs: Vec<InputState> = (0..8).map(|_| InputState::press_b()).collect();
        inputs.push(InputState::press_a());
        let (_, lines) = run_app(inputs);

        assert_eq!(lines.len(), 2);
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields[1], "10000000", "Wrapped difficulty 1 means target 128");
    }

    #[test]
    fn test_max_difficulty_target() {
        // 7次B按键把难度调到8（目标1）
        let mut inputs: Vec<InputState> = (0..7).map(|_| InputState::press_b()).collect();
        inputs.push(InputState::press_a());
        let (_, lines) = run_app(inputs);

        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields[1], "00000001");
        assert_eq!(fields[2], "00000000", "Only hash 0 beats target 1");
        let attempts: u64 = fields[5].parse().unwrap();
        assert!(attempts <= 256);
    }

    #[test]
    fn test_restart_and_reselect_transitions() {
        // 确认 -> 挖矿(1) -> A重开(2) -> B回选择 -> 确认 -> 挖矿(3) -> 退出
        let inputs = vec![
            InputState::press_a(),
            InputState::press_a(),
            InputState::press_b(),
            InputState::press_a(),
        ];
        let (_, lines) = run_app(inputs);

        assert_eq!(lines.len(), 4);
        for (i, line) in lines[1..].iter().enumerate() {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields[0], (i + 1).to_string());
        }
    }

    #[test]
    fn test_shake_toggles_sound_mode() {
        let inputs = vec![InputState::shake(), InputState::press_a()];
        let (app, _) = run_app(inputs);

        assert!(app.sound_mode);
        // 一次切换提示音 + 一次解出提示音
        assert_eq!(app.board.tones.len(), 2);
        // 解的8个位被逐位播报
        assert_eq!(app.board.clips.len(), 8);
    }

    #[test]
    fn test_idle_polls_keep_selection_rendered() {
        let inputs = vec![
            InputState::idle(),
            InputState::press_b(),
            InputState::idle(),
            InputState::exit(),
        ];
        let temp_dir = tempdir().unwrap();
        let board = MemoryBoard::with_inputs(inputs);
        let mut app = App::new(board, test_config());
        let mut logger = RunLogger::new(temp_dir.path().join("pow_log.csv"));
        app.run(&mut logger).unwrap();

        // 每次轮询前都重绘难度条；最后一帧应有2个点亮的像素
        let frame = app.board.frames.last().unwrap();
        assert_eq!(frame[1], COLOR_DIFFICULTY);
        assert_eq!(frame[2], COLOR_DIFFICULTY);
        assert_eq!(frame[3], (0, 0, 0));
    }
}
