use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alarm::DEFAULT_SOUND;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// optional file defaults for the command surface
/// the file is only ever read, cli flags win over anything in here
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sound: PathBuf,
    pub poll_interval: f64,
    pub ring_interval: f64,
    /// default alarm time in the same HH:MM:SS AM/PM form the cli takes
    pub alarm_time: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound: PathBuf::from(DEFAULT_SOUND),
            poll_interval: 1.0,
            ring_interval: 1.0,
            alarm_time: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// fails if the file can't be read or isn't valid toml
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&config)?)
    }

    /// load the config at `path` (or the default location), falling back to
    /// built-in defaults with a logged warning when it is missing or broken
    #[must_use]
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = path.map_or_else(Self::config_path, Path::to_path_buf);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "rouse").map_or_else(
            || PathBuf::from("rouse.toml"),
            |dirs| dirs.config_dir().join("config.toml"),
        )
    }

    #[must_use]
    pub fn is_config_present() -> bool {
        Self::config_path().exists()
    }
}
