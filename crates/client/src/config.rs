//! Client configuration
//!
//! TOML-loadable connection settings for the Loki endpoint.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

fn default_url() -> String {
    "http://localhost:3100".to_string()
}

fn default_read_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    500
}

/// Connection settings for a Loki endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LokiConfig {
    /// Base URL of the Loki instance
    #[serde(default = "default_url")]
    pub url: String,

    /// Basic-auth username
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password
    #[serde(default)]
    pub password: Option<String>,

    /// How long a query to Loki has before timing out, in seconds
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff (doubles each retry)
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

impl Default for LokiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: None,
            password: None,
            read_timeout_secs: default_read_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl LokiConfig {
    /// Create a config pointing at a URL, everything else defaulted
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ClientError::config(format!("read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| ClientError::config(format!("parse {}: {e}", path.display())))
    }

    /// Get the read timeout as a Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}
