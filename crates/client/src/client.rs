//! Loki query client
//!
//! Issues range queries against `/loki/api/v1/query_range` and decodes the
//! response body through `lokq-protocol`.

use chrono::{DateTime, SecondsFormat, Utc};
use lokq_protocol::{decode_response, QueryResponse, ResultKind};
use tracing::debug;

use crate::config::LokiConfig;
use crate::error::ClientError;
use crate::resilience::{execute_with_retry, RetryPolicy};

const QUERY_RANGE_PATH: &str = "/loki/api/v1/query_range";
const USER_AGENT: &str = concat!("lokq/", env!("CARGO_PKG_VERSION"));

/// Predict the result shape a LogQL query will produce
///
/// The output column types must be fixed before the query runs. A plain
/// stream selector starts with `{`; everything else (range and aggregation
/// functions such as `rate(...)` or `count_over_time(...)`) evaluates to a
/// matrix over a range query.
pub fn expected_result_kind(query: &str) -> ResultKind {
    if query.trim_start().starts_with('{') {
        ResultKind::Streams
    } else {
        ResultKind::Matrix
    }
}

/// Async client for one Loki endpoint
#[derive(Debug, Clone)]
pub struct LokiClient {
    http: reqwest::Client,
    config: LokiConfig,
}

impl LokiClient {
    /// Create a client from connection settings
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the HTTP client cannot be built
    /// (TLS or proxy misconfiguration).
    pub fn new(config: LokiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.read_timeout())
            .build()
            .map_err(|e| ClientError::config(format!("loki HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Run a range query and decode the response
    ///
    /// Transient transport failures are retried with exponential backoff;
    /// decode errors are permanent and fail immediately.
    pub async fn query_range(
        &self,
        query: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: Option<u32>,
    ) -> Result<QueryResponse, ClientError> {
        let policy = RetryPolicy {
            max_retries: self.config.max_retries,
            base_delay: std::time::Duration::from_millis(self.config.retry_base_delay_ms),
        };

        let body = execute_with_retry(policy, "query_range", || {
            self.fetch_query_range(query, start, end, limit)
        })
        .await?;

        debug!(bytes = body.len(), query, "decoding query_range response");
        Ok(decode_response(&body)?)
    }

    /// One GET against the query_range endpoint, returning the raw body
    async fn fetch_query_range(
        &self,
        query: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: Option<u32>,
    ) -> Result<String, ClientError> {
        let url = format!("{}{QUERY_RANGE_PATH}", self.config.url.trim_end_matches('/'));

        let mut params = vec![
            ("query".to_string(), query.to_string()),
            (
                "start".to_string(),
                start.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ),
            (
                "end".to_string(),
                end.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ),
            ("direction".to_string(), "forward".to_string()),
        ];
        if let Some(limit) = limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        let mut request = self.http.get(&url).query(&params);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
