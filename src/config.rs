use std::path::PathBuf;

use crate::error::{MazeError, Result};

/// Directory for log files
pub const LOG_DIR_VAR: &str = "MAZEGRAPH_LOG_DIR";
/// `tracing_subscriber::EnvFilter` directive, e.g. `debug` or `mazegraph::generators=debug`
pub const LOG_FILTER_VAR: &str = "MAZEGRAPH_LOG";
/// Fixed seed for reproducible mazes
pub const SEED_VAR: &str = "MAZEGRAPH_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_dir: PathBuf,
    pub log_filter: String,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_filter: "info".to_string(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds a config from a variable lookup, falling back to defaults for unset
    /// or empty variables.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let seed = match get(SEED_VAR) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                MazeError::InvalidInput(format!(
                    "{} must be an unsigned integer, got '{}'",
                    SEED_VAR, raw
                ))
            })?),
            None => None,
        };

        Ok(Config {
            log_dir: get(LOG_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_filter: get(LOG_FILTER_VAR).unwrap_or(defaults.log_filter),
            seed,
        })
    }
}
