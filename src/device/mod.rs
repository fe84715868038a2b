pub mod memory;
pub mod terminal;

pub use memory::MemoryBoard;
pub use terminal::TerminalBoard;

use crate::error::Result;

// RGB颜色，亮度在show()时统一应用
pub type Rgb = (u8, u8, u8);

// 板载LED环的像素数量
pub const PIXEL_COUNT: usize = 10;

pub const COLOR_BIT_SET: Rgb = (0, 255, 0);
pub const COLOR_BIT_CLEAR: Rgb = (255, 0, 0);
pub const COLOR_DIFFICULTY: Rgb = (255, 0, 0);
pub const COLOR_BLANK: Rgb = (0, 0, 0);

// 摇晃手势的单轴加速度阈值
pub const SHAKE_THRESHOLD: f32 = 50.0;

// 一次输入轮询得到的快照
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub button_a: bool,
    pub button_b: bool,
    pub quit: bool,
    pub acceleration: [f32; 3],
}

impl InputState {
    pub fn idle() -> Self {
        InputState::default()
    }

    pub fn press_a() -> Self {
        InputState {
            button_a: true,
            ..InputState::default()
        }
    }

    pub fn press_b() -> Self {
        InputState {
            button_b: true,
            ..InputState::default()
        }
    }

    pub fn shake() -> Self {
        InputState {
            acceleration: [SHAKE_THRESHOLD + 1.0, 0.0, 0.0],
            ..InputState::default()
        }
    }

    pub fn exit() -> Self {
        InputState {
            quit: true,
            ..InputState::default()
        }
    }
}

// LED显示能力：逐像素写入颜色，show()时整体刷新
pub trait DisplaySurface {
    fn set_pixel(&mut self, index: usize, color: Rgb);
    fn fill(&mut self, color: Rgb);
    fn show(&mut self);
}

// 输入能力：轮询按钮与加速度
pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

// 音频能力：定频提示音与命名音频片段
// 片段缺失时返回错误，由调用方决定是否静默继续
pub trait AudioSink {
    fn play_tone(&mut self, freq_hz: f32, secs: f32);
    fn play_clip(&mut self, name: &str) -> Result<()>;
}
