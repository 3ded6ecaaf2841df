//! Per-type validation rules.
//!
//! The rule table mirrors the transform table but is narrower on purpose:
//! only `string`, `int`, `smallint`, `bigint`, and `date` carry rules. Every
//! other data type (including the array forms) reports a no-validator detail
//! rather than passing silently.

use serde_json::Value;

use crate::model::{DataType, FieldSpec, ScalarType};
use crate::transform::{coerce_number, parse_date};

/// Outcome of a validator function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Value satisfies the rule
    Valid,
    /// Value fails the rule; the caller composes the generic detail message
    Invalid,
    /// Value fails with a specific detail, returned verbatim
    Detail(String),
}

/// A custom validator attached to a single field, run in place of the
/// built-in type rule. May panic; the field wrapper converts a panic into a
/// detail string.
pub type FieldValidator = fn(&Value, &FieldSpec) -> Validation;

const INT_MIN: f64 = -2_147_483_648.0;
const INT_MAX: f64 = 2_147_483_647.0;
const SMALLINT_MIN: f64 = -32_768.0;
const SMALLINT_MAX: f64 = 32_767.0;
// inset from the true 64-bit range to stay within f64 integer precision
const BIGINT_MIN: f64 = -9_223_372_036_854_775_000.0;
const BIGINT_MAX: f64 = 9_223_372_036_854_775_000.0;

/// Runs the built-in rule for `data_type` against `value`.
pub fn validate_value(data_type: &DataType, value: &Value, spec: &FieldSpec) -> Validation {
    if data_type.array {
        return no_validator(data_type, value);
    }

    match &data_type.scalar {
        ScalarType::Int => check_min_max(value, spec, INT_MIN, INT_MAX),
        ScalarType::SmallInt => check_min_max(value, spec, SMALLINT_MIN, SMALLINT_MAX),
        ScalarType::BigInt => check_min_max(value, spec, BIGINT_MIN, BIGINT_MAX),
        ScalarType::String => validate_string(value, spec),
        ScalarType::Date => validate_date(value),
        ScalarType::Number | ScalarType::Boolean | ScalarType::Unknown(_) => {
            no_validator(data_type, value)
        }
    }
}

/// Renders a value for inclusion in a detail message: strings bare, other
/// values as their JSON text.
pub(super) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn no_validator(data_type: &DataType, value: &Value) -> Validation {
    Validation::Detail(format!(
        "Cannot validate {}. No validator for {}",
        display_value(value),
        data_type
    ))
}

fn validate_string(value: &Value, spec: &FieldSpec) -> Validation {
    let Some(s) = value.as_str() else {
        return Validation::Invalid;
    };

    let length = s.chars().count() as f64;
    let min = spec.min.unwrap_or(0.0);
    let within = length >= min && spec.max.map_or(true, |max| length <= max);

    if within {
        Validation::Valid
    } else {
        Validation::Invalid
    }
}

fn validate_date(value: &Value) -> Validation {
    if parse_date(value).is_some() {
        Validation::Valid
    } else {
        Validation::Invalid
    }
}

/// Numeric range check shared by the integer types. An explicit `min`/`max`
/// on the spec replaces the type bound entirely.
fn check_min_max(value: &Value, spec: &FieldSpec, type_min: f64, type_max: f64) -> Validation {
    let Some(n) = coerce_number(value) else {
        return Validation::Invalid;
    };

    let min = spec.min.unwrap_or(type_min);
    let max = spec.max.unwrap_or(type_max);

    if n >= min && n <= max {
        Validation::Valid
    } else {
        Validation::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldSpec;
    use serde_json::json;

    fn run(data_type: &str, value: Value) -> Validation {
        let spec = FieldSpec::new(data_type);
        validate_value(&spec.data_type, &value, &spec)
    }

    #[test]
    fn test_int_bounds() {
        assert_eq!(run("int", json!(0)), Validation::Valid);
        assert_eq!(run("int", json!(2147483647_i64)), Validation::Valid);
        assert_eq!(run("int", json!(2147483648_i64)), Validation::Invalid);
        assert_eq!(run("int", json!(-2147483649_i64)), Validation::Invalid);
    }

    #[test]
    fn test_smallint_bounds() {
        assert_eq!(run("smallint", json!(32767)), Validation::Valid);
        assert_eq!(run("smallint", json!(100000)), Validation::Invalid);
        assert_eq!(run("smallint", json!(-32769)), Validation::Invalid);
    }

    #[test]
    fn test_bigint_bounds_are_inset() {
        assert_eq!(run("bigint", json!(9_223_372_036_854_775_000_i64)), Validation::Valid);
        assert_eq!(run("bigint", json!("9223372036854775807")), Validation::Invalid);
    }

    #[test]
    fn test_numeric_strings_and_booleans_coerce() {
        assert_eq!(run("int", json!("100")), Validation::Valid);
        assert_eq!(run("int", json!("abc")), Validation::Invalid);
        assert_eq!(run("int", json!(true)), Validation::Valid);
        assert_eq!(run("int", Value::Null), Validation::Invalid);
    }

    #[test]
    fn test_explicit_bounds_replace_type_defaults() {
        let spec = FieldSpec::new("int").max(10.0);
        assert_eq!(validate_value(&spec.data_type, &json!(10), &spec), Validation::Valid);
        assert_eq!(validate_value(&spec.data_type, &json!(11), &spec), Validation::Invalid);

        // a min override alone leaves the type max in place
        let spec = FieldSpec::new("smallint").min(0.0);
        assert_eq!(validate_value(&spec.data_type, &json!(-1), &spec), Validation::Invalid);
        assert_eq!(validate_value(&spec.data_type, &json!(32767), &spec), Validation::Valid);
    }

    #[test]
    fn test_string_length_bounds() {
        assert_eq!(run("string", json!("any")), Validation::Valid);
        assert_eq!(run("string", json!("")), Validation::Valid);
        assert_eq!(run("string", json!(42)), Validation::Invalid);

        let spec = FieldSpec::new("string").min(2.0).max(4.0);
        assert_eq!(validate_value(&spec.data_type, &json!("ab"), &spec), Validation::Valid);
        assert_eq!(validate_value(&spec.data_type, &json!("a"), &spec), Validation::Invalid);
        assert_eq!(validate_value(&spec.data_type, &json!("abcde"), &spec), Validation::Invalid);
    }

    #[test]
    fn test_date_parseability() {
        assert_eq!(run("date", json!("2016-10-02")), Validation::Valid);
        assert_eq!(run("date", json!("i am not a date bro")), Validation::Invalid);
        assert_eq!(run("date", json!(true)), Validation::Invalid);
        assert_eq!(run("date", Value::Null), Validation::Invalid);
    }

    #[test]
    fn test_unvalidated_types_report_no_validator() {
        assert_eq!(
            run("uuid", json!("abc")),
            Validation::Detail("Cannot validate abc. No validator for uuid".to_string())
        );
        assert_eq!(
            run("number", json!(1.5)),
            Validation::Detail("Cannot validate 1.5. No validator for number".to_string())
        );
        assert_eq!(
            run("array:int", json!([1, 2])),
            Validation::Detail("Cannot validate [1,2]. No validator for array:int".to_string())
        );
    }
}
