//! User configuration, read from `{config_dir}/recall/config.toml`
//!
//! ```toml
//! data_file = "/home/me/notes/collections.json"
//! color = false
//! initial_interval_secs = 5.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slides::models::INITIAL_INTERVAL_SECS;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the library is stored. Falls back to the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Use ANSI colors when stdout is a terminal
    pub color: bool,
    /// Interval new slides start from
    pub initial_interval_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            color: true,
            initial_interval_secs: INITIAL_INTERVAL_SECS as f64,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("recall").join("config.toml"))
    }

    /// Read a config file. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Read the config from its default location, falling back to defaults
    /// (with a warning) if it cannot be read.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn initial_interval(&self) -> Duration {
        let secs = if self.initial_interval_secs.is_finite() && self.initial_interval_secs >= 0.0 {
            self.initial_interval_secs
        } else {
            INITIAL_INTERVAL_SECS as f64
        };
        Duration::milliseconds((secs * 1000.0).round() as i64)
    }
}
