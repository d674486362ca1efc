use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::config::Config;

/// File name looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "taskrow.toml";

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parse config text. `path` is only used for error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read and parse a config file
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_config(&text, path)?;
    debug!(path = %path.display(), tasks = config.tasks.len(), "config loaded");
    Ok(config)
}

/// Resolve the config for a run.
///
/// An explicit path must exist. Without one, `taskrow.toml` in `dir` is
/// used when present, otherwise defaults apply.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        read_config(&candidate)
    } else {
        Ok(Config::default())
    }
}
