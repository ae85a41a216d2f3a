//! Retry policy for transient transport failures
//!
//! Only transport-level failures are retried: timeouts, connection errors,
//! server errors (5xx), and rate limits (429). Decode errors and client-side
//! misuse are permanent and surface immediately.

use std::time::Duration;

use tracing::debug;

use crate::error::ClientError;

/// Exponential-backoff retry settings
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum retry attempts after the first try
    pub max_retries: u32,
    /// Base delay, doubled each retry
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry attempt N (exponential backoff, capped at 64x)
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * (1 << attempt.min(6))
    }
}

/// Whether an error is worth retrying
pub fn is_retryable(error: &ClientError) -> bool {
    match error {
        ClientError::Http(e) => e.is_timeout() || e.is_connect(),
        ClientError::Status { status, .. } => *status >= 500 || *status == 429,
        _ => false,
    }
}

/// Run `operation` with exponential-backoff retries for transient failures
pub(crate) async fn execute_with_retry<F, Fut, T>(
    policy: RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ClientError>>,
{
    let mut last_error: Option<ClientError> = None;

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let delay = policy.delay(attempt - 1);
            debug!(
                operation = operation_name,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying after delay"
            );
            tokio::time::sleep(delay).await;
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if is_retryable(&e) => {
                debug!(operation = operation_name, attempt, error = %e, "request failed, will retry");
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(ClientError::RetriesExhausted {
        attempts: policy.max_retries + 1,
        last_error: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string()),
    })
}
