use std::collections::VecDeque;

use super::{AudioSink, DisplaySurface, InputSource, InputState, Rgb, PIXEL_COUNT};
use crate::error::{MicroProverError, Result};

// 内存中的模拟板：记录每次刷新的像素帧与播放的音频，
// 并按脚本回放输入事件；用于测试与无头运行
pub struct MemoryBoard {
    pub pixels: [Rgb; PIXEL_COUNT],
    pub frames: Vec<[Rgb; PIXEL_COUNT]>,
    pub inputs: VecDeque<InputState>,
    pub tones: Vec<(f32, f32)>,
    pub clips: Vec<String>,
    // 配置为"缺失"的音频片段名，播放时返回错误
    pub missing_clips: Vec<String>,
}

impl MemoryBoard {
    pub fn new() -> Self {
        MemoryBoard {
            pixels: [COLOR_OFF; PIXEL_COUNT],
            frames: Vec::new(),
            inputs: VecDeque::new(),
            tones: Vec::new(),
            clips: Vec::new(),
            missing_clips: Vec::new(),
        }
    }

    pub fn with_inputs(inputs: Vec<InputState>) -> Self {
        let mut board = MemoryBoard::new();
        board.inputs = inputs.into();
        board
    }
}

const COLOR_OFF: Rgb = (0, 0, 0);

impl Default for MemoryBoard {
    fn default() -> Self {
        MemoryBoard::new()
    }
}

impl DisplaySurface for MemoryBoard {
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if index < PIXEL_COUNT {
            self.pixels[index] = color;
        }
    }

    fn fill(&mut self, color: Rgb) {
        self.pixels = [color; PIXEL_COUNT];
    }

    fn show(&mut self) {
        self.frames.push(self.pixels);
    }
}

impl InputSource for MemoryBoard {
    fn poll(&mut self) -> InputState {
        // 脚本耗尽后返回退出事件，保证测试中的循环必然结束
        self.inputs.pop_front().unwrap_or_else(InputState::exit)
    }
}

impl AudioSink for MemoryBoard {
    fn play_tone(&mut self, freq_hz: f32, secs: f32) {
        self.tones.push((freq_hz, secs));
    }

    fn play_clip(&mut self, name: &str) -> Result<()> {
        if self.missing_clips.iter().any(|m| m == name) {
            return Err(MicroProverError::Audio(format!("音频片段缺失: {}", name)));
        }
        self.clips.push(name.to_string());
        Ok(())
    }
}
