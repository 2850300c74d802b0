//! Configuration management for ABIDE Fetcher
//!
//! This module provides optional TOML configuration with zero-config
//! defaults. Precedence is: command-line flags over configuration file
//! values over built-in defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::client::ClientConfig;
use crate::constants::{http, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Fetch run settings
    pub fetch: FetchSettings,
    /// HTTP client settings
    pub client: ClientSettings,
}

/// Fetch run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Number of concurrent download workers
    pub workers: usize,
    /// Keep existing local files rather than re-fetching them
    pub skip_existing: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            workers: workers::DEFAULT_WORKER_COUNT,
            skip_existing: true,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit path, or fall back to defaults when none given
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Derive the HTTP client configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(self.client.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.client.connect_timeout_secs),
            ..ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_config_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.fetch.workers, 10);
        assert!(config.fetch.skip_existing);
        assert_eq!(config.client.request_timeout_secs, 60);
    }

    #[test]
    fn test_partial_config_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[fetch]\nworkers = 4\n").unwrap();
        file.flush().unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.fetch.workers, 4);
        // Untouched sections keep their defaults
        assert!(config.fetch.skip_existing);
        assert_eq!(config.client.connect_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[fetch\nworkers = ").unwrap();
        file.flush().unwrap();

        let result = AppConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_client_config_mapping() {
        let config = AppConfig {
            client: ClientSettings {
                request_timeout_secs: 5,
                connect_timeout_secs: 2,
            },
            ..Default::default()
        };

        let client_config = config.client_config();
        assert_eq!(client_config.request_timeout, Duration::from_secs(5));
        assert_eq!(client_config.connect_timeout, Duration::from_secs(2));
    }
}
