use tracing::info;

use micro_prover::config::Config;
use micro_prover::device::TerminalBoard;
use micro_prover::error::Result;
use micro_prover::logger::RunLogger;
use micro_prover::menu::App;

fn main() -> Result<()> {
    // 初始化日志记录器
    tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_ansi(true)
        .init();

    let config = Config::load()?;
    info!("按键说明（输入后回车）: b=调整难度 a=确认/重开 s=摇晃切换语音模式 q=退出");

    let board = TerminalBoard::new(config.display.brightness, config.audio.sounds_dir.clone());
    let mut logger = RunLogger::new(config.logging.path.clone());

    let mut app = App::new(board, config);
    app.run(&mut logger)
}
