//! Row cursor over a decoded result
//!
//! Pull-based flattening of (series, point) pairs into rows of exactly three
//! logical fields: label map, zoned timestamp, value. Rows are yielded in
//! series order, then point order, exactly as they appeared in the response;
//! downstream consumers that do not re-sort depend on this.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, Utc};

use crate::error::CursorError;
use crate::model::{Labels, LokiResult};
use crate::schema::{ResultSchema, TimestampUnit, ValueType};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Cursor position state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    Positioned,
    Exhausted,
    Closed,
}

/// Lazy row cursor over a decoded [`LokiResult`]
///
/// The value column's physical type is fixed at construction from the result
/// kind: text for streams, double for matrix. Timestamps are rendered with a
/// single fixed UTC offset captured when the cursor is built (the host's
/// local zone, evaluated once, not per row), so wall-clock rendering stays
/// consistent for the cursor's lifetime. A query window that straddles a
/// daylight-saving transition renders the far side with the near side's
/// offset; use [`RowCursor::with_offset`] to pin an explicit offset.
#[derive(Debug)]
pub struct RowCursor {
    result: Option<LokiResult>,
    schema: ResultSchema,
    offset: FixedOffset,
    series: usize,
    point: usize,
    state: State,
}

impl RowCursor {
    /// Create a cursor rendering timestamps in the host's current local offset
    pub fn new(result: LokiResult) -> Self {
        Self::with_offset(result, *Local::now().offset())
    }

    /// Create a cursor rendering timestamps in an explicit fixed offset
    pub fn with_offset(result: LokiResult, offset: FixedOffset) -> Self {
        Self {
            schema: ResultSchema::of(result.kind()),
            result: Some(result),
            offset,
            series: 0,
            point: 0,
            state: State::NotStarted,
        }
    }

    /// Output schema fixed at construction
    pub fn schema(&self) -> ResultSchema {
        self.schema
    }

    /// Advance to the next (series, point) row
    ///
    /// Returns `Ok(true)` when positioned on a row, `Ok(false)` once the
    /// flattened sequence is drained. Draining is sticky: further calls keep
    /// returning `Ok(false)`.
    ///
    /// # Errors
    ///
    /// [`CursorError::Closed`] after [`RowCursor::close`].
    pub fn advance(&mut self) -> Result<bool, CursorError> {
        let result = match (self.state, self.result.as_ref()) {
            (State::Closed, _) | (_, None) => return Err(CursorError::Closed),
            (State::Exhausted, _) => return Ok(false),
            (State::Positioned, Some(result)) => {
                self.point += 1;
                result
            }
            (State::NotStarted, Some(result)) => result,
        };

        // Skip empty series until a point exists or the series run out.
        while let Some(count) = result.point_count(self.series) {
            if self.point < count {
                self.state = State::Positioned;
                return Ok(true);
            }
            self.series += 1;
            self.point = 0;
        }

        self.state = State::Exhausted;
        Ok(false)
    }

    /// Label map of the current row, shared with the owning series
    pub fn labels(&self) -> Result<&Arc<Labels>, CursorError> {
        match self.current()? {
            LokiResult::Streams(series) => Ok(&series[self.series].labels),
            LokiResult::Matrix(series) => Ok(&series[self.series].labels),
        }
    }

    /// Zoned timestamp of the current row
    ///
    /// The native integer timestamp (nanoseconds for streams, seconds for
    /// matrix) is converted with the cursor's fixed offset.
    pub fn timestamp(&self) -> Result<DateTime<FixedOffset>, CursorError> {
        let nanos = match self.current()? {
            LokiResult::Streams(series) => series[self.series].points[self.point].timestamp_ns,
            LokiResult::Matrix(series) => series[self.series].points[self.point]
                .timestamp_s
                .saturating_mul(NANOS_PER_SEC),
        };
        Ok(DateTime::<Utc>::from_timestamp_nanos(nanos).with_timezone(&self.offset))
    }

    /// Text value of the current row; valid only for streams cursors
    pub fn value_text(&self) -> Result<&str, CursorError> {
        match self.current()? {
            LokiResult::Streams(series) => Ok(&series[self.series].points[self.point].line),
            LokiResult::Matrix(_) => Err(self.type_mismatch(ValueType::Text)),
        }
    }

    /// Double value of the current row; valid only for matrix cursors
    pub fn value_double(&self) -> Result<f64, CursorError> {
        match self.current()? {
            LokiResult::Matrix(series) => Ok(series[self.series].points[self.point].value),
            LokiResult::Streams(_) => Err(self.type_mismatch(ValueType::Double)),
        }
    }

    /// Close the cursor and release the decoded result
    ///
    /// Valid from any state and idempotent. Every other operation fails with
    /// [`CursorError::Closed`] afterwards.
    pub fn close(&mut self) {
        self.state = State::Closed;
        self.result = None;
    }

    /// Source unit of the timestamps this cursor reads
    pub fn timestamp_unit(&self) -> TimestampUnit {
        self.schema.timestamp_unit
    }

    fn current(&self) -> Result<&LokiResult, CursorError> {
        match self.state {
            State::Closed => Err(CursorError::Closed),
            State::NotStarted | State::Exhausted => Err(CursorError::NotPositioned),
            State::Positioned => self.result.as_ref().ok_or(CursorError::Closed),
        }
    }

    fn type_mismatch(&self, requested: ValueType) -> CursorError {
        CursorError::TypeMismatch {
            requested,
            actual: self.schema.value_type,
        }
    }
}
