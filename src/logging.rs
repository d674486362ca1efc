use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Error type for log setup
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not open log file {path}: {source}")]
    OpenError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid log level: {0}")]
    FilterError(#[from] tracing_subscriber::filter::ParseError),
    #[error("could not install log subscriber: {0}")]
    InstallError(String),
}

/// Install a file-backed tracing subscriber. The terminal belongs to the
/// UI, so without a log file nothing is installed and events are dropped.
pub fn init_logging(log_file: Option<&Path>, level: &str) -> Result<(), LoggingError> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let filter = EnvFilter::try_new(level)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::OpenError {
            path: path.to_path_buf(),
            source: e,
        })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::InstallError(e.to_string()))
}
