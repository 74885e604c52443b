//! Manifest fetching
//!
//! The only network boundary of the manifest subsystem. Everything above it
//! works on text, so callers hold an `Arc<dyn ManifestFetcher>` and tests
//! substitute an in-memory implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::{AppError, AppResult, FetchError, FetchResult};
use crate::utils::url::UrlUtils;

/// Retrieves manifest text by URL
#[async_trait]
pub trait ManifestFetcher: Send + Sync {
    /// GET `url` and return the body as text
    async fn fetch_text(&self, url: &str) -> FetchResult<String>;
}

/// reqwest-backed fetcher with a bounded per-request timeout
#[derive(Debug, Clone)]
pub struct HttpManifestFetcher {
    client: Client,
}

impl HttpManifestFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn with_timeout(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hls2srt-player/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn map_send_error(url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::timeout(url)
        } else {
            // The error text would otherwise repeat the unscrubbed URL
            FetchError::request(url, error.without_url().to_string())
        }
    }
}

#[async_trait]
impl ManifestFetcher for HttpManifestFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let safe_url = UrlUtils::obfuscate_credentials(url);
        debug!("Fetching manifest from: {}", safe_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&safe_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(safe_url, status.as_u16()));
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(safe_url.as_str())
            } else {
                FetchError::body(safe_url.as_str(), e.without_url().to_string())
            }
        })?;

        debug!("Fetched {} bytes of manifest text from {}", text.len(), safe_url);
        Ok(text)
    }
}
