//! User configuration
//!
//! Stored as JSON in ~/.config/bitcache/config.json. A missing file means
//! defaults; a malformed one is an error rather than being silently ignored.

use crate::filter::DEFAULT_CAPACITY;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings applied when the command line does not override them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bitmap size in bytes for newly created filters
    pub default_capacity: usize,
    /// Whether saved filters start with the magic header
    pub write_header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_capacity: DEFAULT_CAPACITY,
            write_header: true,
        }
    }
}

impl Config {
    /// Default location (~/.config/bitcache/config.json)
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("bitcache").join("config.json"))
    }

    /// Load from the default location
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path()?)
    }

    /// Load from `path`, falling back to defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config dir: {}", e)))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.default_capacity == 0 {
            return Err(Error::Config("default_capacity must be positive".into()));
        }
        Ok(())
    }
}
