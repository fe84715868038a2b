use tracing::warn;

use crate::bits::byte_to_binary;
use crate::device::AudioSink;

// 无障碍语音播报
// 按整数难度或解的二进制位查找预录音频；
// 片段缺失时只输出诊断并静默继续，绝不中断运行

// 播报当前难度（播放 sounds/<难度>.wav）
pub fn read_difficulty<A: AudioSink + ?Sized>(audio: &mut A, difficulty: u8) {
    if let Err(e) = audio.play_clip(&difficulty.to_string()) {
        warn!("无法播报难度 {}: {}", difficulty, e);
    }
}

// 逐位播报解出的哈希，最高位在前（播放 sounds/0.wav 或 sounds/1.wav）
pub fn read_solution<A: AudioSink + ?Sized>(audio: &mut A, hash8: u8) {
    for bit in byte_to_binary(hash8).chars() {
        if let Err(e) = audio.play_clip(&bit.to_string()) {
            warn!("无法播报解的位 {}: {}", bit, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::MemoryBoard;

    #[test]
    fn test_solution_is_read_bit_by_bit() {
        let mut board = MemoryBoard::new();
        read_solution(&mut board, 0b1010_0001);

        assert_eq!(
            board.clips,
            vec!["1", "0", "1", "0", "0", "0", "0", "1"]
        );
    }

    #[test]
    fn test_difficulty_clip_name() {
        let mut board = MemoryBoard::new();
        read_difficulty(&mut board, 5);
        assert_eq!(board.clips, vec!["5"]);
    }

    #[test]
    fn test_missing_clips_never_abort() {
        let mut board = MemoryBoard::new();
        board.missing_clips = vec!["1".to_string()];

        // 全1的解：所有片段都缺失，播报静默跳过但不会panic
        read_solution(&mut board, 0xFF);
        assert!(board.clips.is_empty());

        board.missing_clips = vec!["3".to_string()];
        read_difficulty(&mut board, 3);
        assert!(board.clips.is_empty());
    }
}
