//! Result kind discriminator and output schema resolution
//!
//! The wire format announces the shape of `result` through the sibling
//! `resultType` field. [`ResultSchema::of`] maps that discriminator to the
//! physical type of the value column and the unit of the source timestamps,
//! driving both the decoder and the cursor's field accessors.

/// Result shape discriminator, read from `data.resultType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// Log-line streams; values are text, timestamps are nanoseconds
    Streams,
    /// Numeric matrix series; values are doubles, timestamps are seconds
    Matrix,
}

impl ResultKind {
    /// Parse the wire discriminator; returns `None` for unrecognized values
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "streams" => Some(Self::Streams),
            "matrix" => Some(Self::Matrix),
            _ => None,
        }
    }

    /// Wire representation of this kind
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Streams => "streams",
            Self::Matrix => "matrix",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical type of the value column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// UTF-8 text (log lines)
    Text,
    /// 64-bit floating point (metric samples)
    Double,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Double => write!(f, "double"),
        }
    }
}

/// Unit of the native integer timestamps on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampUnit {
    /// Nanoseconds since epoch (streams)
    Nanoseconds,
    /// Seconds since epoch (matrix)
    Seconds,
}

/// Output schema fixed per query by the result kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSchema {
    /// Physical type of the value column
    pub value_type: ValueType,
    /// Source unit of the timestamp column
    pub timestamp_unit: TimestampUnit,
}

impl ResultSchema {
    /// Resolve the output schema for a result kind
    ///
    /// Pure two-entry lookup with no fallback; unknown discriminators never
    /// reach this point because the decoder rejects them first.
    pub const fn of(kind: ResultKind) -> Self {
        match kind {
            ResultKind::Streams => Self {
                value_type: ValueType::Text,
                timestamp_unit: TimestampUnit::Nanoseconds,
            },
            ResultKind::Matrix => Self {
                value_type: ValueType::Double,
                timestamp_unit: TimestampUnit::Seconds,
            },
        }
    }
}
