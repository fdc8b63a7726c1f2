//! Configuration file
//!
//! A single TOML file, `~/.config/joyfocus/config.toml` unless
//! `JOYFOCUS_CONFIG` points elsewhere. Every field has a default, so a
//! partial or missing file still yields a usable [`Config`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::pump::PumpSettings;

const CONFIG_DIR: &str = "joyfocus";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_ENV: &str = "JOYFOCUS_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub pump: PumpSettings,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
    pub thread_ids: bool,
    pub file_and_line: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            thread_ids: false,
            file_and_line: true,
        }
    }
}

impl LoggingConfig {
    /// Configured level, falling back to INFO for unknown names.
    pub fn max_level(&self) -> Level {
        self.level.parse().unwrap_or(Level::INFO)
    }
}

impl Config {
    /// `JOYFOCUS_CONFIG` if set, otherwise the per-user config directory.
    pub fn resolve_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        default_path()
    }

    /// Load from `path`. A missing file gives the defaults.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Write the default config to `path` unless a file is already there.
    /// Returns whether a file was written.
    pub async fn ensure_default(path: &Path) -> Result<bool, ConfigError> {
        if tokio::fs::try_exists(path).await? {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(&Self::default())?;
        tokio::fs::write(path, content).await?;
        Ok(true)
    }
}

fn default_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("joyfocus-{}-{}", name, std::process::id()))
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse("[pump]\npoll_interval_ms = 16\n").unwrap();
        assert_eq!(config.pump.poll_interval_ms, 16);
        assert_eq!(config.pump.stats_interval_secs, 30);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn bad_types_are_rejected() {
        let err = Config::parse("[pump]\npoll_interval_ms = \"fast\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn log_level_names() {
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.max_level(), Level::INFO);
        logging.level = "debug".into();
        assert_eq!(logging.max_level(), Level::DEBUG);
        logging.level = "loud".into();
        assert_eq!(logging.max_level(), Level::INFO);
    }

    #[test]
    fn default_path_ends_with_config_file() {
        assert!(default_path().ends_with("joyfocus/config.toml"));
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let path = scratch_dir("missing").join(CONFIG_FILE);
        assert_eq!(Config::load(&path).await.unwrap(), Config::default());
    }

    #[tokio::test]
    async fn ensure_default_writes_once() {
        let dir = scratch_dir("ensure");
        let _ = tokio::fs::remove_dir_all(&dir).await;
        let path = dir.join(CONFIG_FILE);

        assert!(Config::ensure_default(&path).await.unwrap());
        assert!(!Config::ensure_default(&path).await.unwrap());
        assert_eq!(Config::load(&path).await.unwrap(), Config::default());

        tokio::fs::write(&path, "[logging]\nlevel = \"warn\"\n").await.unwrap();
        let loaded = Config::load(&path).await.unwrap();
        assert_eq!(loaded.logging.max_level(), Level::WARN);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
