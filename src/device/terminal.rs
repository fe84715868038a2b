use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use tracing::debug;

use super::{
    AudioSink, DisplaySurface, InputSource, InputState, Rgb, COLOR_BLANK, PIXEL_COUNT,
    SHAKE_THRESHOLD,
};
use crate::error::{MicroProverError, Result};

// 桌面终端上的模拟板
// 一行彩色圆点当作LED环；键盘行输入当作按钮：
// a/b对应两个按钮，s模拟摇晃手势，q退出
pub struct TerminalBoard {
    pixels: [Rgb; PIXEL_COUNT],
    brightness: f32,
    keys: Receiver<String>,
    sounds_dir: PathBuf,
}

impl TerminalBoard {
    pub fn new(brightness: f32, sounds_dir: PathBuf) -> Self {
        // 后台线程逐行读取stdin，主循环通过通道非阻塞轮询，
        // 保持与板载按钮一致的轮询语义
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(_) => break,
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        TerminalBoard {
            pixels: [COLOR_BLANK; PIXEL_COUNT],
            brightness: brightness.clamp(0.0, 1.0),
            keys: rx,
            sounds_dir,
        }
    }

    fn scaled(&self, color: Rgb) -> Rgb {
        (
            (color.0 as f32 * self.brightness) as u8,
            (color.1 as f32 * self.brightness) as u8,
            (color.2 as f32 * self.brightness) as u8,
        )
    }
}

impl DisplaySurface for TerminalBoard {
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if index < PIXEL_COUNT {
            self.pixels[index] = color;
        }
    }

    fn fill(&mut self, color: Rgb) {
        self.pixels = [color; PIXEL_COUNT];
    }

    fn show(&mut self) {
        // 原地重绘一行，模拟像素整体刷新
        let mut line = String::new();
        for color in &self.pixels {
            let (r, g, b) = self.scaled(*color);
            line.push_str(&format!("{} ", "●".truecolor(r, g, b)));
        }
        print!("\r{}", line);
        let _ = io::stdout().flush();
    }
}

impl InputSource for TerminalBoard {
    fn poll(&mut self) -> InputState {
        let mut state = InputState::default();
        match self.keys.try_recv() {
            Ok(line) => match line.trim() {
                "a" => state.button_a = true,
                "b" => state.button_b = true,
                "s" => state.acceleration = [SHAKE_THRESHOLD + 1.0, 0.0, 0.0],
                "q" => state.quit = true,
                "" => {}
                other => debug!("忽略未知按键输入: {}", other),
            },
            Err(TryRecvError::Empty) => {
                // 没有输入时稍作等待，避免空转
                thread::sleep(Duration::from_millis(10));
            }
            Err(TryRecvError::Disconnected) => state.quit = true,
        }
        state
    }
}

impl AudioSink for TerminalBoard {
    fn play_tone(&mut self, freq_hz: f32, secs: f32) {
        // 终端响铃近似板载蜂鸣
        print!("\x07");
        let _ = io::stdout().flush();
        debug!("播放提示音: {}Hz, {}s", freq_hz, secs);
        thread::sleep(Duration::from_secs_f32(secs));
    }

    fn play_clip(&mut self, name: &str) -> Result<()> {
        // 桌面模拟不做真正的音频回放：用存在性检查代替播放，
        // 片段缺失时返回与板载一致的错误
        let path = self.sounds_dir.join(format!("{}.wav", name));
        let meta = std::fs::metadata(&path).map_err(|e| {
            MicroProverError::Audio(format!("无法读取音频文件 {}: {}", path.display(), e))
        })?;
        debug!("播放音频片段: {} ({} 字节)", path.display(), meta.len());
        Ok(())
    }
}
