//! Bridge configuration, loaded from TOML with flag/env overrides.
//!
//! Resolution order: built-in defaults, then the config file, then CLI
//! flags (which clap also fills from `UEBRIDGE_HOST` / `UEBRIDGE_PORT`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default listener endpoint. The editor-side Python listener binds
/// 127.0.0.1:8765 unless reconfigured.
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8765;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Listener host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Listener port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl BridgeConfig {
    /// Load config from a TOML file. Returns `Ok(None)` if the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
        let config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))?;
        Ok(Some(config))
    }

    /// Default config file location: `~/.config/uebridge/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("uebridge").join("config.toml"))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),

    #[error("failed to parse config {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_target_the_local_listener() {
        let config = BridgeConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8765);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let loaded = BridgeConfig::load(Path::new("/nonexistent/uebridge.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9901").unwrap();
        let config = BridgeConfig::load(file.path()).unwrap().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9901);
    }

    #[test]
    fn malformed_file_reports_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not-a-port\"").unwrap();
        let err = BridgeConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
