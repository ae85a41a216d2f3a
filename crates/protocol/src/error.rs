//! Protocol error types
//!
//! Errors that can occur while decoding a Loki response or driving a cursor.

use thiserror::Error;

use crate::schema::ValueType;

/// Errors raised while decoding a query response
///
/// All decode errors are fatal to the current query. The decoder never skips
/// a malformed series or point and never returns a partial result.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Response body is not a valid JSON document
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Envelope is missing a required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The `resultType` discriminator is absent or not a known variant
    #[error("unknown result type: {0}")]
    UnknownResultType(String),

    /// A per-series entry violated the wire contract
    #[error("malformed series: {0}")]
    MalformedSeries(String),

    /// A value tuple violated the wire contract (arity or element type)
    #[error("malformed point: {0}")]
    MalformedPoint(String),
}

impl DecodeError {
    /// Create an unknown result type error
    #[inline]
    pub fn unknown_result_type(kind: impl Into<String>) -> Self {
        Self::UnknownResultType(kind.into())
    }

    /// Create a malformed series error
    #[inline]
    pub fn malformed_series(msg: impl Into<String>) -> Self {
        Self::MalformedSeries(msg.into())
    }

    /// Create a malformed point error
    #[inline]
    pub fn malformed_point(msg: impl Into<String>) -> Self {
        Self::MalformedPoint(msg.into())
    }
}

/// Errors raised by [`RowCursor`](crate::RowCursor) operations
///
/// These are caller-contract violations, not transient conditions; callers
/// should treat them as defects rather than retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    /// A field accessor was called before the first successful advance or
    /// after the cursor was exhausted
    #[error("cursor is not positioned on a row")]
    NotPositioned,

    /// The cursor was closed; no further operations are valid
    #[error("cursor is closed")]
    Closed,

    /// The value was requested as the wrong physical type
    #[error("value type mismatch: requested {requested}, cursor yields {actual}")]
    TypeMismatch {
        requested: ValueType,
        actual: ValueType,
    },
}
