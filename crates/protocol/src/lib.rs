//! Loki wire protocol - query response decoding and row cursoring
//!
//! This crate turns a Loki query response (one JSON document) into a flat
//! sequence of rows for tabular consumption:
//!
//! - `decode_response` - tagged-union decoder for the response envelope;
//!   the `resultType` discriminator selects the variant schema applied to
//!   the sibling `result` payload
//! - `LokiResult` - decoded tagged union: log `Streams` or numeric `Matrix`
//! - `ResultSchema` - maps a result kind to the value column type and the
//!   timestamp source unit
//! - `RowCursor` - pull-based iterator flattening (series, point) pairs
//!   into rows of labels / zoned timestamp / value
//!
//! # Wire Format
//!
//! Each data point arrives as a compact 2-element array rather than a named
//! object:
//!
//! ```text
//! streams: {"stream": {labels}, "values": [["<ns-epoch>", "<line>"], ...]}
//! matrix:  {"metric": {labels}, "values": [[<s-epoch>, "<double>"], ...]}
//! ```
//!
//! Decoding is fail-fast: one malformed series or point aborts the whole
//! decode, since silently dropped data would corrupt downstream aggregates.

mod cursor;
mod decode;
mod error;
mod model;
mod point;
mod schema;

pub use cursor::RowCursor;
pub use decode::decode_response;
pub use error::{CursorError, DecodeError};
pub use model::{Labels, LogSeries, LokiResult, MetricSeries, QueryResponse};
pub use point::{LogPoint, MetricPoint};
pub use schema::{ResultKind, ResultSchema, TimestampUnit, ValueType};

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod decode_test;
#[cfg(test)]
mod schema_test;
