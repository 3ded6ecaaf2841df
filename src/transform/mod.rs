//! Per-type value transforms between storage and wire representations.
//!
//! Dispatch is a fixed, exhaustive table over [`ScalarType`]; the array form
//! wraps the element transform with the compact policy. Transforms are total:
//! malformed or partially-typed input degrades to `null` (or is dropped, for
//! array elements with no representable value) instead of raising.
//!
//! # Design Principles
//!
//! - `Option<&Value>` input distinguishes an absent field from an explicit
//!   `null`; an `Option<Value>` return distinguishes "no representable value"
//!   (omitted from output) from a present `null`
//! - Unknown types transform as identity, so no failure path exists in
//!   serialization
//! - Deterministic output: the same input always produces the same bytes

mod boolean;
mod date;
mod number;
mod string;

pub(crate) use date::parse as parse_date;
pub(crate) use number::coerce as coerce_number;

use serde_json::Value;

use crate::model::{DataType, FieldSpec, ScalarType};

/// Serializes a stored value for the given data type (Database -> Client).
///
/// A `None` return means the field has no representable value and its key is
/// omitted from the output row.
pub fn serialize(data_type: &DataType, value: Option<&Value>, spec: &FieldSpec) -> Option<Value> {
    if data_type.array {
        return Some(Value::Array(map_compact(value, |element| {
            scalar_serialize(&data_type.scalar, element, spec)
        })));
    }
    scalar_serialize(&data_type.scalar, value, spec)
}

/// Deserializes a client value for the given data type (Client -> Database).
pub fn deserialize(data_type: &DataType, value: Option<&Value>, spec: &FieldSpec) -> Option<Value> {
    if data_type.array {
        return Some(Value::Array(map_compact(value, |element| {
            scalar_deserialize(&data_type.scalar, element, spec)
        })));
    }
    scalar_deserialize(&data_type.scalar, value, spec)
}

fn scalar_serialize(scalar: &ScalarType, value: Option<&Value>, spec: &FieldSpec) -> Option<Value> {
    match scalar {
        ScalarType::Number | ScalarType::Int | ScalarType::SmallInt | ScalarType::BigInt => {
            number::serialize(value, spec)
        }
        ScalarType::String => string::serialize(value, spec),
        ScalarType::Boolean => boolean::serialize(value, spec),
        ScalarType::Date => date::serialize(value, spec),
        ScalarType::Unknown(_) => value.cloned(),
    }
}

fn scalar_deserialize(scalar: &ScalarType, value: Option<&Value>, spec: &FieldSpec) -> Option<Value> {
    match scalar {
        ScalarType::Number | ScalarType::Int | ScalarType::SmallInt | ScalarType::BigInt => {
            number::deserialize(value, spec)
        }
        ScalarType::String => string::deserialize(value, spec),
        ScalarType::Boolean => boolean::deserialize(value, spec),
        ScalarType::Date => date::deserialize(value, spec),
        ScalarType::Unknown(_) => value.cloned(),
    }
}

/// Maps array elements through the element transform, dropping elements with
/// no representable value.
///
/// Only `None` results are filtered; an element that transforms to an
/// explicit `null` is kept. Non-array input yields an empty sequence.
fn map_compact<F>(value: Option<&Value>, transform: F) -> Vec<Value>
where
    F: Fn(Option<&Value>) -> Option<Value>,
{
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|element| transform(Some(element)))
            .collect(),
        _ => Vec::new(),
    }
}
