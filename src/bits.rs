use crate::error::{MicroProverError, Result};

// 字节各个位置的位掩码，最高位在前
const BIT_MASKS: [u8; 8] = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

// 将一个字节转换为位数组，true表示1，false表示0，最高位在前
pub fn byte_to_bits(byte: u8) -> [bool; 8] {
    let mut bits = [false; 8];
    for (i, mask) in BIT_MASKS.iter().enumerate() {
        bits[i] = byte & mask != 0;
    }
    bits
}

// 将一个字节渲染为8位二进制字符串（最高位在前，零填充）
pub fn byte_to_binary(byte: u8) -> String {
    format!("{:08b}", byte)
}

// 解析8位二进制字符串，与byte_to_binary互逆
pub fn parse_binary(s: &str) -> Result<u8> {
    if s.len() != 8 {
        return Err(MicroProverError::Other(format!(
            "二进制字符串长度必须为8: {:?}",
            s
        )));
    }
    u8::from_str_radix(s, 2).map_err(|e| {
        MicroProverError::Other(format!("无法解析二进制字符串 {:?}: {}", s, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_round_trip() {
        for byte in 0..=255u8 {
            let rendered = byte_to_binary(byte);
            assert_eq!(rendered.len(), 8, "Rendering must always be 8 characters");
            assert!(rendered.chars().all(|c| c == '0' || c == '1'));
            assert_eq!(parse_binary(&rendered).unwrap(), byte);
        }
    }

    #[test]
    fn test_msb_first() {
        assert_eq!(byte_to_binary(0b1000_0000), "10000000");
        assert_eq!(byte_to_binary(0b0000_0001), "00000001");

        let bits = byte_to_bits(0b1000_0000);
        assert!(bits[0]);
        assert!(bits[1..].iter().all(|b| !b));
    }

    #[test]
    fn test_bits_match_rendering() {
        for byte in [0u8, 1, 2, 128, 170, 255] {
            let bits = byte_to_bits(byte);
            let rendered = byte_to_binary(byte);
            for (bit, c) in bits.iter().zip(rendered.chars()) {
                assert_eq!(*bit, c == '1');
            }
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_binary("101").is_err());
        assert!(parse_binary("1010101010").is_err());
        assert!(parse_binary("1010102x").is_err());
    }
}
