use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::{MicroProverError, Result};
use crate::nonce;

const CONFIG_ENV: &str = "MICRO_PROVER_CONFIG";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pow: PowConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PowConfig {
    // "哈希"位宽K：目标值 = 2^(K - 难度)，难度范围 [1, K]
    pub hash_bits: u8,
    // nonce策略：random | permutation | walk
    pub nonce_policy: String,
}

impl Default for PowConfig {
    fn default() -> Self {
        PowConfig {
            hash_bits: 8,
            nonce_policy: "random".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    // 固定的低亮度
    pub brightness: f32,
    // 难度按键的去抖时长
    pub debounce_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            brightness: 0.1,
            debounce_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            path: PathBuf::from("pow_log.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sounds_dir: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            sounds_dir: PathBuf::from("sounds"),
        }
    }
}

impl Config {
    // 从TOML文件加载配置；文件缺失时使用内置默认值
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());

        let config_str = match std::fs::read_to_string(&config_path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("配置文件 {} 不存在，使用默认配置", config_path);
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(MicroProverError::Config(format!(
                    "无法读取配置文件 {}: {}",
                    config_path, e
                )))
            }
        };

        let config: Config = toml::from_str(&config_str)
            .map_err(|e| MicroProverError::Config(format!("配置文件格式错误: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pow.hash_bits < 1 || self.pow.hash_bits > 8 {
            return Err(MicroProverError::Config(format!(
                "hash_bits必须在 [1, 8] 内: {}",
                self.pow.hash_bits
            )));
        }
        // 策略名称在启动时校验，避免确认难度后才在模拟循环中失败
        if !nonce::is_known_policy(&self.pow.nonce_policy) {
            return Err(MicroProverError::Config(format!(
                "未知的nonce策略: {}, 可用: {}",
                self.pow.nonce_policy,
                nonce::POLICY_NAMES.join(" | ")
            )));
        }
        Ok(())
    }
}
