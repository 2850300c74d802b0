//! HTTP client for the remote archive
//!
//! This module configures the shared reqwest client and performs single-shot
//! streaming downloads. There is no authentication and no retry logic: each
//! request is issued exactly once, and a request that times out surfaces as
//! a transport failure for the executor to classify.

use std::path::Path;
use std::time::Duration;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::trace;
use url::Url;

use crate::constants::http;
use crate::errors::{ConfigError, ConfigResult, DownloadError, DownloadResult};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent sent with every request
    pub user_agent: String,
    /// Per-request timeout; an expired timeout degrades to a transport error
    pub request_timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Maximum idle connections per host
    pub pool_max_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_max_per_host: http::POOL_MAX_PER_HOST,
        }
    }
}

impl ClientConfig {
    /// Build the shared reqwest client from this configuration
    pub fn build_http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .pool_max_idle_per_host(self.pool_max_per_host)
            .build()
    }
}

/// Client for the remote archive
///
/// Cheap to clone and safe to share across workers; the underlying reqwest
/// client holds the connection pool.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ArchiveClient {
    /// Create a client for the given archive root
    pub fn new(base_url: &str, config: ClientConfig) -> ConfigResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let http = config
            .build_http_client()
            .map_err(|e| ConfigError::InvalidValue {
                field: "client".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { http, base_url })
    }

    /// The archive root URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Issue a single GET and stream the body into `destination`
    ///
    /// Any prior content at `destination` is replaced. The parent directory
    /// must already exist. No retries are attempted.
    pub async fn fetch_to_file(&self, url: &str, destination: &Path) -> DownloadResult<()> {
        trace!("GET {}", url);
        let mut response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::ServerError {
                status: status.as_u16(),
            });
        }

        let mut file = File::create(destination).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert!(config.user_agent.contains("ABIDE-Fetcher"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ArchiveClient::new("not a url", ClientConfig::default());
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_base_url_roundtrip() {
        let client = ArchiveClient::new(
            "https://archive.example.com/freesurfer/5.1",
            ClientConfig::default(),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://archive.example.com/freesurfer/5.1");
    }
}
