//! Decoded response model
//!
//! Owned, immutable types produced by one decode call and consumed by one
//! [`RowCursor`](crate::RowCursor). Label maps are reference-counted so every
//! row of a series can share the series' label set without copying.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::point::{LogPoint, MetricPoint};
use crate::schema::ResultKind;

/// Label set attached to a series, shared read-only by all of its rows
pub type Labels = BTreeMap<String, String>;

/// One log stream: a label set and its ordered log points
#[derive(Debug, Clone)]
pub struct LogSeries {
    /// Labels shared by every point in this series
    pub labels: Arc<Labels>,
    /// Log points in original response order
    pub points: Vec<LogPoint>,
}

/// One metric series: a label set and its ordered samples
#[derive(Debug, Clone)]
pub struct MetricSeries {
    /// Labels shared by every point in this series
    pub labels: Arc<Labels>,
    /// Samples in original response order
    pub points: Vec<MetricPoint>,
}

/// Decoded result payload, tagged by the `resultType` discriminator
#[derive(Debug, Clone)]
pub enum LokiResult {
    /// Log-line streams
    Streams(Vec<LogSeries>),
    /// Numeric matrix series
    Matrix(Vec<MetricSeries>),
}

impl LokiResult {
    /// The discriminator this payload was decoded under
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::Streams(_) => ResultKind::Streams,
            Self::Matrix(_) => ResultKind::Matrix,
        }
    }

    /// Number of series in the result
    pub fn series_count(&self) -> usize {
        match self {
            Self::Streams(series) => series.len(),
            Self::Matrix(series) => series.len(),
        }
    }

    /// Number of points in the series at `index`, or `None` past the end
    pub(crate) fn point_count(&self, index: usize) -> Option<usize> {
        match self {
            Self::Streams(series) => series.get(index).map(|s| s.points.len()),
            Self::Matrix(series) => series.get(index).map(|s| s.points.len()),
        }
    }

    /// Total number of flattened (series, point) rows
    pub fn row_count(&self) -> usize {
        match self {
            Self::Streams(series) => series.iter().map(|s| s.points.len()).sum(),
            Self::Matrix(series) => series.iter().map(|s| s.points.len()).sum(),
        }
    }

    /// Check whether the result holds no rows
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// Decoded response envelope
#[derive(Debug, Clone)]
pub struct QueryResponse {
    /// Advisory status string from the backend; not validated
    pub status: String,
    /// The decoded result payload
    pub result: LokiResult,
}
