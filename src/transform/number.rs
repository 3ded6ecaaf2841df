//! Numeric transform, shared by `number`, `int`, `smallint`, and `bigint`.

use serde_json::Value;

use crate::model::FieldSpec;

/// Database -> Client. Numeric-coercible input becomes a number; everything
/// else becomes `null`.
pub(super) fn serialize(value: Option<&Value>, _spec: &FieldSpec) -> Option<Value> {
    Some(match value.and_then(coerce) {
        Some(n) => number_value(n),
        None => Value::Null,
    })
}

/// Client -> Database. Same coercion as [`serialize`].
pub(super) fn deserialize(value: Option<&Value>, spec: &FieldSpec) -> Option<Value> {
    serialize(value, spec)
}

/// Coerces a value to a finite number: numbers pass through, numeric strings
/// parse, booleans become 1/0. `null`, non-numeric strings, and structured
/// values do not coerce.
pub(crate) fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Integral results are emitted as JSON integers so repeated serialization is
/// byte-stable; fractional results stay floating point.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}
