//! Tests for the tagged-result decoder

use crate::decode::decode_response;
use crate::error::DecodeError;
use crate::model::LokiResult;
use crate::schema::ResultKind;

const STREAMS_BODY: &str = r#"{
    "status": "success",
    "data": {
        "resultType": "streams",
        "result": [
            {
                "stream": {"app": "web", "level": "info"},
                "values": [
                    ["1700000000000000000", "first line"],
                    ["1700000001000000000", "second line"]
                ]
            },
            {
                "stream": {"app": "db"},
                "values": [
                    ["1700000002000000000", "third line"]
                ]
            }
        ]
    }
}"#;

const MATRIX_BODY: &str = r#"{
    "status": "success",
    "data": {
        "resultType": "matrix",
        "result": [
            {
                "metric": {"job": "api"},
                "values": [[1700000000, "1.5"], [1700000060, "2.5"]]
            }
        ]
    }
}"#;

#[test]
fn decodes_streams_response() {
    let response = decode_response(STREAMS_BODY).unwrap();
    assert_eq!(response.status, "success");
    assert_eq!(response.result.kind(), ResultKind::Streams);
    assert_eq!(response.result.series_count(), 2);
    assert_eq!(response.result.row_count(), 3);

    let LokiResult::Streams(series) = &response.result else {
        panic!("expected streams");
    };
    assert_eq!(series[0].labels.get("app").map(String::as_str), Some("web"));
    assert_eq!(series[0].points[0].line, "first line");
    assert_eq!(series[0].points[0].timestamp_ns, 1_700_000_000_000_000_000);
    assert_eq!(series[1].points[0].line, "third line");
}

#[test]
fn decodes_matrix_response() {
    let response = decode_response(MATRIX_BODY).unwrap();
    assert_eq!(response.result.kind(), ResultKind::Matrix);

    let LokiResult::Matrix(series) = &response.result else {
        panic!("expected matrix");
    };
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].points[0].timestamp_s, 1_700_000_000);
    assert_eq!(series[0].points[0].value, 1.5);
    assert_eq!(series[0].points[1].value, 2.5);
}

#[test]
fn series_order_is_preserved() {
    let body = r#"{"status":"success","data":{"resultType":"streams","result":[
        {"stream":{"n":"a"},"values":[["1","a1"]]},
        {"stream":{"n":"b"},"values":[["2","b1"]]},
        {"stream":{"n":"c"},"values":[["3","c1"]]}
    ]}}"#;
    let response = decode_response(body).unwrap();
    let LokiResult::Streams(series) = &response.result else {
        panic!("expected streams");
    };
    let order: Vec<&str> = series
        .iter()
        .map(|s| s.labels.get("n").map(String::as_str).unwrap_or(""))
        .collect();
    assert_eq!(order, ["a", "b", "c"]);
}

#[test]
fn empty_result_yields_zero_series() {
    for kind in ["streams", "matrix"] {
        let body =
            format!(r#"{{"status":"success","data":{{"resultType":"{kind}","result":[]}}}}"#);
        let response = decode_response(&body).unwrap();
        assert_eq!(response.result.series_count(), 0);
        assert!(response.result.is_empty());
    }
}

#[test]
fn absent_label_key_yields_empty_map() {
    let body = r#"{"status":"success","data":{"resultType":"streams","result":[
        {"values":[["1","no labels"]]}
    ]}}"#;
    let response = decode_response(body).unwrap();
    let LokiResult::Streams(series) = &response.result else {
        panic!("expected streams");
    };
    assert!(series[0].labels.is_empty());
    assert_eq!(series[0].points[0].line, "no labels");
}

#[test]
fn unknown_result_type_is_rejected() {
    let body = r#"{"status":"success","data":{"resultType":"vector","result":[]}}"#;
    let err = decode_response(body).unwrap_err();
    match err {
        DecodeError::UnknownResultType(kind) => assert_eq!(kind, "vector"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_result_type_is_rejected() {
    let body = r#"{"status":"success","data":{"result":[]}}"#;
    let err = decode_response(body).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownResultType(_)), "{err}");
}

#[test]
fn missing_data_is_rejected() {
    let err = decode_response(r#"{"status":"success"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::MissingField("data")), "{err}");
}

#[test]
fn missing_result_is_rejected() {
    let body = r#"{"status":"success","data":{"resultType":"streams"}}"#;
    let err = decode_response(body).unwrap_err();
    assert!(
        matches!(err, DecodeError::MissingField("data.result")),
        "{err}"
    );
}

#[test]
fn malformed_point_aborts_whole_decode() {
    let body = r#"{"status":"success","data":{"resultType":"streams","result":[
        {"stream":{"ok":"yes"},"values":[["1","fine"]]},
        {"stream":{"ok":"no"},"values":[["2","fine",[1,2]]]}
    ]}}"#;
    let err = decode_response(body).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedPoint(_)), "{err}");
}

#[test]
fn non_array_result_is_malformed() {
    let body = r#"{"status":"success","data":{"resultType":"matrix","result":{"bad":1}}}"#;
    let err = decode_response(body).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedSeries(_)), "{err}");
}

#[test]
fn invalid_json_is_rejected() {
    let err = decode_response("{not json").unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)), "{err}");
}

#[test]
fn status_is_advisory_only() {
    let body = r#"{"status":"weird","data":{"resultType":"matrix","result":[]}}"#;
    let response = decode_response(body).unwrap();
    assert_eq!(response.status, "weird");
}

#[test]
fn label_map_is_shared_per_series() {
    let response = decode_response(STREAMS_BODY).unwrap();
    let LokiResult::Streams(series) = &response.result else {
        panic!("expected streams");
    };
    // One allocation per series; rows borrow it through the Arc.
    assert_eq!(std::sync::Arc::strong_count(&series[0].labels), 1);
}
