//! Loki HTTP client
//!
//! Async transport to Loki's `query_range` endpoint. Retrieves one response
//! body per query and hands it to `lokq-protocol` for decoding; retry policy,
//! auth, and timeouts live here, never in the decode core.
//!
//! # Usage
//!
//! ```ignore
//! use lokq_client::{LokiClient, LokiConfig};
//!
//! let client = LokiClient::new(LokiConfig::default())?;
//! let response = client.query_range("{app=\"web\"}", start, end, Some(100)).await?;
//! let mut cursor = lokq_protocol::RowCursor::new(response.result);
//! while cursor.advance()? {
//!     println!("{}", cursor.value_text()?);
//! }
//! ```

mod client;
mod config;
mod error;
mod resilience;

pub use client::{expected_result_kind, LokiClient};
pub use config::LokiConfig;
pub use error::ClientError;
pub use resilience::{is_retryable, RetryPolicy};

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

// Test modules - only compiled during testing
#[cfg(test)]
mod client_test;
