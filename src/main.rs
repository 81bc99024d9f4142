mod actions;
mod api;
mod app;
mod config;
mod error;
mod forms;
mod mapper;
mod pipeline;
mod session;
mod state;
mod sync;
mod types;
mod ui;

use app::App;
use color_eyre::Result;
use config::Config;
use std::fs::OpenOptions;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "/tmp/loyalty-tiers-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let config = Config::load()?;

    let terminal = ratatui::init();
    let app_result = App::new(config).run(terminal).await;
    ratatui::restore();
    app_result
}

/// Log to a file, the terminal belongs to the UI
fn init_logging() -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();

    Ok(())
}
