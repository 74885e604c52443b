use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub stream: StreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Manifest URL reported as current before any stream is set
    #[serde(default = "default_hls_url")]
    pub default_hls_url: String,
    /// Placeholder duration reported before any manifest is loaded
    #[serde(default = "default_total_length")]
    pub default_total_length: f64,
    /// Timeout for a single manifest fetch
    #[serde(default = "default_fetch_timeout", with = "duration_serde::duration")]
    pub fetch_timeout: Duration,
    /// Delay between live playlist refreshes
    #[serde(default = "default_poll_interval", with = "duration_serde::duration")]
    pub poll_interval: Duration,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// Stream defaults
fn default_hls_url() -> String {
    DEFAULT_HLS_URL.to_string()
}

fn default_total_length() -> f64 {
    DEFAULT_TOTAL_LENGTH
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            default_hls_url: default_hls_url(),
            default_total_length: default_total_length(),
            fetch_timeout: default_fetch_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            stream: StreamConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, writing defaults if it is missing
    ///
    /// The `HLS_URL` environment variable, when set, overrides
    /// `stream.default_hls_url`.
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let mut config = if Path::new(config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };

        config.apply_env_overrides(std::env::var(HLS_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self, hls_url: Option<String>) {
        if let Some(url) = hls_url.filter(|u| !u.trim().is_empty()) {
            self.stream.default_hls_url = url.trim().to_string();
        }
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.stream.poll_interval.is_zero() {
            anyhow::bail!("stream.poll_interval must be greater than zero");
        }
        if self.stream.fetch_timeout.is_zero() {
            anyhow::bail!("stream.fetch_timeout must be greater than zero");
        }
        if !self.stream.default_total_length.is_finite() || self.stream.default_total_length < 0.0 {
            anyhow::bail!("stream.default_total_length must be a non-negative number");
        }
        Ok(())
    }
}
