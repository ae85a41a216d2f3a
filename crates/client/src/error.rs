//! Client error types

use thiserror::Error;

/// Errors that can occur while talking to Loki
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration (bad URL, unreadable config file, ...)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// HTTP transport failure (connect, TLS, timeout)
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),

    /// Loki answered with a non-success status
    #[error("loki returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body failed to decode
    #[error(transparent)]
    Decode(#[from] lokq_protocol::DecodeError),

    /// All retry attempts exhausted
    #[error("request failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

impl ClientError {
    /// Create a configuration error
    #[inline]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
