//! Configuration file support for the `wgida` binary.
//!
//! Supports both YAML and TOML, dispatched on the file extension.
//!
//! # Example YAML configuration:
//! ```yaml
//! # WGIDA configuration file
//!
//! # Dataset of simulation runs (JSON array)
//! dataset: /data/iceberg-runs.json
//!
//! # Server settings
//! server:
//!   port: 8420
//!   bind: "127.0.0.1"
//!
//! # Logging settings
//! logging:
//!   level: info
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Path to the dataset file (JSON array of runs).
    pub dataset: Option<PathBuf>,

    /// Server configuration.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server port.
    pub port: u16,

    /// Bind address.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8420,
            bind: "127.0.0.1".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config extension: {0} (expected .yaml, .yml or .toml)")]
    UnsupportedExtension(String),
}

impl Config {
    /// Load a configuration file, dispatching on its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
            Some("toml") => Ok(toml::from_str(&contents)?),
            other => Err(ConfigError::UnsupportedExtension(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
