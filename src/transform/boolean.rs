//! Boolean transform.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::model::FieldSpec;

static TRUE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(true|t|1)$").unwrap());

/// Database -> Client. Always yields a boolean, never `null`: booleans pass
/// through, strings match the true-pattern, number 1 is true, everything
/// else is false.
pub(super) fn serialize(value: Option<&Value>, _spec: &FieldSpec) -> Option<Value> {
    let out = match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => TRUE_PATTERN.is_match(s),
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        _ => false,
    };
    Some(Value::Bool(out))
}

/// Client -> Database. Truthiness coercion: `null`, zero, the empty string,
/// and `false` are false; everything else is true.
pub(super) fn deserialize(value: Option<&Value>, _spec: &FieldSpec) -> Option<Value> {
    let out = match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    };
    Some(Value::Bool(out))
}
