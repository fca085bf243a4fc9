//! Logger configuration.
//!
//! `LogConfig` can be loaded from a TOML file; every field has a default so
//! partial files work.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output encoding for log entries
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// One `" - "`-separated line per entry
    #[default]
    Console,
    /// One JSON object per entry
    Json,
}

/// Logger configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file receiving every entry alongside stdout
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Minimum severity: "debug", "info", "warn" or "error"
    #[serde(default = "default_level")]
    pub level: String,

    /// Logger name attached to every entry
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub encoding: Encoding,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_level(),
            name: default_name(),
            encoding: Encoding::default(),
        }
    }
}

// Default value functions
fn default_log_file() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("glint").join("glint.log")
}

fn default_level() -> String {
    "info".into()
}

fn default_name() -> String {
    "glint".into()
}

impl LogConfig {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: LogConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
