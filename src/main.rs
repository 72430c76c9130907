use std::fs::File;
use std::sync::Mutex;

use quest_tracker::{app::App, config::AppConfig, util::log};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load()?;
    log::init(&config.log_dir)?;
    let trace_file = File::create(config.log_dir.join("quest-tracker.log"))?;
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .with_ansi(false)
        .with_writer(Mutex::new(trace_file))
        .init();

    let app = App::new(&config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}
