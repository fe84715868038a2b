use thiserror::Error;

#[derive(Error, Debug)]
pub enum MicroProverError {
    #[error("IO错误: {0}")]
    Io(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("音频错误: {0}")]
    Audio(String),

    #[error("CSV解析错误: {0}")]
    Csv(String),

    #[error("绘图错误: {0}")]
    Plot(String),

    #[error("其他错误: {0}")]
    Other(String),
}

impl From<std::io::Error> for MicroProverError {
    fn from(err: std::io::Error) -> Self {
        MicroProverError::Io(err.to_string())
    }
}

impl From<csv::Error> for MicroProverError {
    fn from(err: csv::Error) -> Self {
        MicroProverError::Csv(err.to_string())
    }
}

impl From<toml::de::Error> for MicroProverError {
    fn from(err: toml::de::Error) -> Self {
        MicroProverError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MicroProverError>;
