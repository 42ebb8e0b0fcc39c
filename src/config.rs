//! Configuration loaded from `~/.config/scicalc/config.toml`.
//!
//! ```toml
//! [history]
//! capacity = 10
//! display_count = 5
//! file = "/home/me/.calculator_history.json"
//!
//! [logging]
//! level = "warn"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::history::default_history_path;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_DISPLAY_COUNT: usize = 5;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of records kept in memory and on disk.
    pub capacity: usize,
    /// Number of records shown by the `l` command.
    pub display_count: usize,
    pub file: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            display_count: DEFAULT_DISPLAY_COUNT,
            file: None,
        }
    }
}

impl HistoryConfig {
    pub fn path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_history_path)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `explicit` if given, otherwise from the
    /// default location. A missing default file yields the defaults; an
    /// explicit file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scicalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.history.capacity, DEFAULT_HISTORY_CAPACITY);
        assert_eq!(config.history.display_count, DEFAULT_DISPLAY_COUNT);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.history.path(), default_history_path());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [history]
            capacity = 100
            file = "/tmp/calc.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.history.capacity, 100);
        assert_eq!(config.history.display_count, DEFAULT_DISPLAY_COUNT);
        assert_eq!(config.history.path(), PathBuf::from("/tmp/calc.json"));
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse("[history]\ncapacity = \"lots\"").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.logging.level, "debug");
    }
}
