//! Tests for result-shape prediction and retry classification

use std::time::Duration;

use lokq_protocol::ResultKind;

use crate::client::expected_result_kind;
use crate::error::ClientError;
use crate::resilience::{is_retryable, RetryPolicy};

#[test]
fn stream_selectors_predict_streams() {
    assert_eq!(
        expected_result_kind(r#"{app="web"}"#),
        ResultKind::Streams
    );
    assert_eq!(
        expected_result_kind(r#"  {job="api"} |= "error""#),
        ResultKind::Streams
    );
}

#[test]
fn function_queries_predict_matrix() {
    assert_eq!(
        expected_result_kind(r#"rate({app="web"}[5m])"#),
        ResultKind::Matrix
    );
    assert_eq!(
        expected_result_kind(r#"count_over_time({job="api"}[1h])"#),
        ResultKind::Matrix
    );
    assert_eq!(
        expected_result_kind(r#"sum by (level) (rate({app="web"}[5m]))"#),
        ResultKind::Matrix
    );
}

#[test]
fn server_errors_and_rate_limits_are_retryable() {
    for status in [500u16, 502, 503, 429] {
        let err = ClientError::Status {
            status,
            body: String::new(),
        };
        assert!(is_retryable(&err), "{status} should be retryable");
    }
}

#[test]
fn client_errors_are_permanent() {
    for status in [400u16, 401, 404] {
        let err = ClientError::Status {
            status,
            body: String::new(),
        };
        assert!(!is_retryable(&err), "{status} should be permanent");
    }
    assert!(!is_retryable(&ClientError::config("bad url")));
}

#[test]
fn decode_errors_are_permanent() {
    let decode_err = lokq_protocol::decode_response("{not json").unwrap_err();
    assert!(!is_retryable(&ClientError::Decode(decode_err)));
}

#[test]
fn backoff_doubles_and_caps() {
    let policy = RetryPolicy {
        max_retries: 10,
        base_delay: Duration::from_millis(100),
    };
    assert_eq!(policy.delay(0), Duration::from_millis(100));
    assert_eq!(policy.delay(1), Duration::from_millis(200));
    assert_eq!(policy.delay(2), Duration::from_millis(400));
    // Capped at 64x the base delay
    assert_eq!(policy.delay(9), Duration::from_millis(6400));
}
