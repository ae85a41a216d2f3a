//! Tests for result kind parsing and schema resolution

use crate::schema::{ResultKind, ResultSchema, TimestampUnit, ValueType};

#[test]
fn parses_known_discriminators() {
    assert_eq!(ResultKind::parse("streams"), Some(ResultKind::Streams));
    assert_eq!(ResultKind::parse("matrix"), Some(ResultKind::Matrix));
}

#[test]
fn rejects_unknown_discriminators() {
    assert_eq!(ResultKind::parse("vector"), None);
    assert_eq!(ResultKind::parse("Streams"), None);
    assert_eq!(ResultKind::parse(""), None);
}

#[test]
fn round_trips_wire_representation() {
    for kind in [ResultKind::Streams, ResultKind::Matrix] {
        assert_eq!(ResultKind::parse(kind.as_str()), Some(kind));
    }
}

#[test]
fn streams_resolve_to_text_over_nanoseconds() {
    let schema = ResultSchema::of(ResultKind::Streams);
    assert_eq!(schema.value_type, ValueType::Text);
    assert_eq!(schema.timestamp_unit, TimestampUnit::Nanoseconds);
}

#[test]
fn matrix_resolves_to_double_over_seconds() {
    let schema = ResultSchema::of(ResultKind::Matrix);
    assert_eq!(schema.value_type, ValueType::Double);
    assert_eq!(schema.timestamp_unit, TimestampUnit::Seconds);
}
