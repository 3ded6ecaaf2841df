//! Date transform.
//!
//! Dates travel through the value domain as canonical RFC 3339 UTC strings,
//! so serialized output is byte-stable regardless of the stored input form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::model::FieldSpec;

/// Database -> Client. Parseable input becomes the canonical string form;
/// everything else (including booleans and `null`) becomes `null`.
pub(super) fn serialize(value: Option<&Value>, _spec: &FieldSpec) -> Option<Value> {
    Some(match value.and_then(parse) {
        Some(instant) => Value::String(canonical(instant)),
        None => Value::Null,
    })
}

/// Client -> Database. Strings and numbers parse to a canonical date value;
/// `null` passes through; absent stays absent; any other type becomes `null`.
pub(super) fn deserialize(value: Option<&Value>, _spec: &FieldSpec) -> Option<Value> {
    match value {
        None => None,
        Some(Value::Null) => Some(Value::Null),
        Some(v @ (Value::String(_) | Value::Number(_))) => Some(match parse(v) {
            Some(instant) => Value::String(canonical(instant)),
            None => Value::Null,
        }),
        Some(_) => Some(Value::Null),
    }
}

/// Attempts to read a value as an instant: strings via the accepted formats,
/// numbers as epoch milliseconds.
pub(crate) fn parse(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_str(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

fn canonical(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
