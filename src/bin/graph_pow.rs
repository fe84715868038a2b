use tracing::info;

use micro_prover::error::Result;
use micro_prover::plot;

// 日志与输出文件名固定，均相对当前目录
const LOG_FILE: &str = "pow_log.csv";
const OUT_FILE: &str = "pow_attempts.png";

fn main() -> Result<()> {
    // 初始化日志记录器
    tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let rows = plot::load_log(LOG_FILE)?;
    info!("从 {} 读取 {} 条运行记录", LOG_FILE, rows.len());

    let groups = plot::group_attempts(&rows);
    plot::render_bar_chart(&groups, OUT_FILE)?;
    info!("图表已写入 {}", OUT_FILE);

    Ok(())
}
