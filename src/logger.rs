use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

use crate::bits::byte_to_binary;

// CSV表头，字段顺序与板载日志保持一致
pub const CSV_HEADER: &str = "Run,Target,Solution_Hash8,Block,Solution_Nonce,Attempts";

// 一轮已解出的运行记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub run: u64,
    pub target: u8,
    pub hash8: u8,
    pub block: u32,
    pub nonce: u32,
    pub attempts: u64,
}

impl RunRecord {
    // 渲染为一行CSV：目标值与哈希用8位二进制字符串，其余为十进制
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.run,
            byte_to_binary(self.target),
            byte_to_binary(self.hash8),
            self.block,
            self.nonce,
            self.attempts
        )
    }
}

// 追加式运行日志
// 写入失败绝不中断模拟：每次失败只输出一条诊断并继续
pub struct RunLogger {
    path: PathBuf,
    failed_writes: u64,
}

impl RunLogger {
    // 初始化日志：写入（截断）表头并镜像到控制台
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let mut logger = RunLogger {
            path: path.into(),
            failed_writes: 0,
        };

        println!("{}", CSV_HEADER);
        if let Err(e) = std::fs::write(&logger.path, format!("{}\n", CSV_HEADER)) {
            logger.failed_writes += 1;
            warn!("无法写入日志表头 {}: {}", logger.path.display(), e);
        }
        logger
    }

    // 追加一条运行记录，同时镜像到控制台
    pub fn log_run(&mut self, record: &RunRecord) {
        let line = record.to_csv_line();
        println!("{}", line);

        if let Err(e) = self.append(&line) {
            self.failed_writes += 1;
            warn!("无法写入日志文件 {}: {}", self.path.display(), e);
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        // 与板载实现一致：每条记录单独打开、追加、关闭
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }

    pub fn failed_writes(&self) -> u64 {
        self.failed_writes
    }
}
