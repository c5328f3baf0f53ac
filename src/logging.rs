use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{MazeError, Result};

/// Routes `tracing` output to a daily log file under `config.log_dir`, keeping
/// stdout free for the maze itself.
///
/// The returned guard flushes pending log lines on drop and must be held until exit.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "mazegraph.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(&config.log_filter).map_err(|e| {
        MazeError::InvalidInput(format!("bad log filter '{}': {}", config.log_filter, e))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| MazeError::Logging(e.to_string()))?;

    tracing::info!("Logging to {}", config.log_dir.display());
    Ok(guard)
}
