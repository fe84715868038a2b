// 导出所有模块
pub mod bits;
pub mod config;
pub mod device;
pub mod error;
pub mod logger;
pub mod menu;
pub mod narrator;
pub mod nonce;
pub mod plot;
pub mod pow;

// 导出常用类型
pub use config::Config;
pub use device::{MemoryBoard, TerminalBoard};
pub use error::{MicroProverError, Result};
pub use logger::{RunLogger, RunRecord};
pub use menu::{App, Phase};
pub use nonce::NoncePolicy;
pub use pow::{ProofOfWork, Solution};
