//! Tagged-result decoder
//!
//! The response envelope is `{status, data: {resultType, result}}` where the
//! shape of `result` is a function of the sibling `resultType` field, not
//! self-describing. Decoding is an explicit two-step: the discriminator is
//! extracted into [`ResultKind`] first, then the payload is decoded through a
//! match over that enum. The payload is captured as a raw JSON slice and
//! decoded one series at a time, so the document is never materialized as a
//! generic value tree.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::DecodeError;
use crate::model::{Labels, LogSeries, LokiResult, MetricSeries, QueryResponse};
use crate::point;
use crate::schema::ResultKind;

/// Envelope with the result payload left raw until the discriminator is known
#[derive(Deserialize)]
struct RawEnvelope<'a> {
    #[serde(default)]
    status: String,
    #[serde(borrow)]
    data: Option<RawData<'a>>,
}

#[derive(Deserialize)]
struct RawData<'a> {
    #[serde(rename = "resultType")]
    result_type: Option<String>,
    #[serde(borrow)]
    result: Option<&'a RawValue>,
}

/// Wire shape of one streams entry; an absent `stream` key is an empty map
#[derive(Deserialize)]
struct RawLogSeries<'a> {
    #[serde(default)]
    stream: Labels,
    #[serde(borrow, default)]
    values: Vec<&'a RawValue>,
}

/// Wire shape of one matrix entry; an absent `metric` key is an empty map
#[derive(Deserialize)]
struct RawMetricSeries<'a> {
    #[serde(default)]
    metric: Labels,
    #[serde(borrow, default)]
    values: Vec<&'a RawValue>,
}

/// Decode one JSON response document into a [`QueryResponse`]
///
/// Fails on the first malformed series or point; there is no partial-result
/// tolerance. An empty `result` array is valid and yields zero series.
///
/// # Errors
///
/// - [`DecodeError::Json`] if the body is not valid JSON
/// - [`DecodeError::MissingField`] if `data` or `data.result` is absent
/// - [`DecodeError::UnknownResultType`] if `data.resultType` is absent or
///   not one of `streams` / `matrix`
/// - [`DecodeError::MalformedSeries`] / [`DecodeError::MalformedPoint`] on
///   wire contract violations inside the payload
pub fn decode_response(body: &str) -> Result<QueryResponse, DecodeError> {
    let envelope: RawEnvelope<'_> = serde_json::from_str(body)?;
    let data = envelope.data.ok_or(DecodeError::MissingField("data"))?;

    let kind = match data.result_type.as_deref() {
        Some(raw) => ResultKind::parse(raw)
            .ok_or_else(|| DecodeError::unknown_result_type(raw))?,
        None => return Err(DecodeError::unknown_result_type("<absent>")),
    };

    let raw_result = data
        .result
        .ok_or(DecodeError::MissingField("data.result"))?;

    let result = match kind {
        ResultKind::Streams => LokiResult::Streams(decode_streams(raw_result)?),
        ResultKind::Matrix => LokiResult::Matrix(decode_matrix(raw_result)?),
    };

    Ok(QueryResponse {
        status: envelope.status,
        result,
    })
}

/// Split the raw result payload into one raw slice per series
fn split_series<'a>(raw: &'a RawValue, kind: ResultKind) -> Result<Vec<&'a RawValue>, DecodeError> {
    serde_json::from_str(raw.get()).map_err(|_| {
        DecodeError::malformed_series(format!("{kind} result is not an array of series objects"))
    })
}

fn decode_streams(raw: &RawValue) -> Result<Vec<LogSeries>, DecodeError> {
    let entries = split_series(raw, ResultKind::Streams)?;
    let mut series = Vec::with_capacity(entries.len());
    for entry in entries {
        series.push(decode_log_series(entry)?);
    }
    Ok(series)
}

fn decode_matrix(raw: &RawValue) -> Result<Vec<MetricSeries>, DecodeError> {
    let entries = split_series(raw, ResultKind::Matrix)?;
    let mut series = Vec::with_capacity(entries.len());
    for entry in entries {
        series.push(decode_metric_series(entry)?);
    }
    Ok(series)
}

fn decode_log_series(raw: &RawValue) -> Result<LogSeries, DecodeError> {
    let entry: RawLogSeries<'_> = serde_json::from_str(raw.get())
        .map_err(|e| DecodeError::malformed_series(e.to_string()))?;

    let mut points = Vec::with_capacity(entry.values.len());
    for value in entry.values {
        points.push(point::decode_log_point(value)?);
    }

    Ok(LogSeries {
        labels: Arc::new(entry.stream),
        points,
    })
}

fn decode_metric_series(raw: &RawValue) -> Result<MetricSeries, DecodeError> {
    let entry: RawMetricSeries<'_> = serde_json::from_str(raw.get())
        .map_err(|e| DecodeError::malformed_series(e.to_string()))?;

    let mut points = Vec::with_capacity(entry.values.len());
    for value in entry.values {
        points.push(point::decode_metric_point(value)?);
    }

    Ok(MetricSeries {
        labels: Arc::new(entry.metric),
        points,
    })
}
