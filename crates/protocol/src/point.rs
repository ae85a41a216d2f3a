//! Compact-tuple codec
//!
//! Each data point is wire-encoded as a 2-element array `[timestamp, payload]`
//! instead of a named object, and the payload type is not self-describing:
//! the caller picks the variant. Log points carry a nanosecond epoch timestamp
//! and a text line; metric points carry a second epoch timestamp (fractional
//! parts allowed, truncated to whole seconds) and a double that usually
//! arrives as a JSON string.
//!
//! The codec is independent of label-map decoding so it can be unit-tested
//! with bare arrays.

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::DecodeError;

/// One log line with its nanosecond-resolution timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct LogPoint {
    /// Nanoseconds since the Unix epoch
    pub timestamp_ns: i64,
    /// The log line text
    pub line: String,
}

/// One metric sample with its second-resolution timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    /// Whole seconds since the Unix epoch
    pub timestamp_s: i64,
    /// The sample value
    pub value: f64,
}

/// Decode a `["<ns-epoch>", "<line>"]` tuple into a log point
pub(crate) fn decode_log_point(raw: &RawValue) -> Result<LogPoint, DecodeError> {
    let (ts, payload) = split_pair(raw)?;
    let timestamp_ns = decode_epoch(ts, false)?;
    let line: String = serde_json::from_str(payload.get()).map_err(|_| {
        DecodeError::malformed_point(format!("expected a string line, got `{}`", payload.get()))
    })?;
    Ok(LogPoint { timestamp_ns, line })
}

/// Decode a `[<s-epoch>, "<double>"]` tuple into a metric point
pub(crate) fn decode_metric_point(raw: &RawValue) -> Result<MetricPoint, DecodeError> {
    let (ts, payload) = split_pair(raw)?;
    let timestamp_s = decode_epoch(ts, true)?;
    let value = decode_sample(payload)?;
    Ok(MetricPoint { timestamp_s, value })
}

/// Split a raw array into exactly two elements
fn split_pair(raw: &RawValue) -> Result<(&RawValue, &RawValue), DecodeError> {
    let elements: Vec<&RawValue> = serde_json::from_str(raw.get()).map_err(|_| {
        DecodeError::malformed_point(format!(
            "expected a [timestamp, value] array, got `{}`",
            raw.get()
        ))
    })?;
    if elements.len() != 2 {
        return Err(DecodeError::malformed_point(format!(
            "expected 2 elements, got {}",
            elements.len()
        )));
    }
    Ok((elements[0], elements[1]))
}

/// Decode the timestamp element: an integer, an integer-valued number, or a
/// string containing either
///
/// Sub-second fractions are valid only when `allow_fraction` is set (metric
/// points); they are truncated to whole seconds.
fn decode_epoch(raw: &RawValue, allow_fraction: bool) -> Result<i64, DecodeError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Epoch<'a> {
        Int(i64),
        Float(f64),
        Text(&'a str),
    }

    let epoch: Epoch<'_> = serde_json::from_str(raw.get()).map_err(|_| {
        DecodeError::malformed_point(format!("timestamp is not numeric: `{}`", raw.get()))
    })?;

    match epoch {
        Epoch::Int(v) => Ok(v),
        Epoch::Float(v) if v.fract() == 0.0 || allow_fraction => Ok(v.trunc() as i64),
        Epoch::Float(v) => Err(DecodeError::malformed_point(format!(
            "timestamp has a fractional part: {v}"
        ))),
        Epoch::Text(s) => {
            if let Ok(v) = s.parse::<i64>() {
                return Ok(v);
            }
            match s.parse::<f64>() {
                Ok(v) if v.fract() == 0.0 || allow_fraction => Ok(v.trunc() as i64),
                _ => Err(DecodeError::malformed_point(format!(
                    "timestamp is not numeric: `{s}`"
                ))),
            }
        }
    }
}

/// Decode the sample element: a double wire-encoded as a JSON string, or a
/// bare number
///
/// Prometheus-style special values (`NaN`, `+Inf`, `-Inf`) are accepted.
fn decode_sample(raw: &RawValue) -> Result<f64, DecodeError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Sample<'a> {
        Num(f64),
        Text(&'a str),
    }

    let sample: Sample<'_> = serde_json::from_str(raw.get()).map_err(|_| {
        DecodeError::malformed_point(format!("expected a numeric sample, got `{}`", raw.get()))
    })?;

    match sample {
        Sample::Num(v) => Ok(v),
        Sample::Text("NaN") => Ok(f64::NAN),
        Sample::Text("+Inf") | Sample::Text("Inf") => Ok(f64::INFINITY),
        Sample::Text("-Inf") => Ok(f64::NEG_INFINITY),
        Sample::Text(s) => s.parse::<f64>().map_err(|_| {
            DecodeError::malformed_point(format!("sample is not numeric: `{s}`"))
        }),
    }
}
