//! String transform.

use serde_json::Value;

use crate::model::FieldSpec;

/// Database -> Client. Strings pass through unchanged; absent and `null`
/// become `null`; other values stringify (structured values to their JSON
/// text).
pub(super) fn serialize(value: Option<&Value>, _spec: &FieldSpec) -> Option<Value> {
    let out = match value {
        None | Some(Value::Null) => Value::Null,
        Some(Value::String(s)) => Value::String(s.clone()),
        Some(Value::Bool(b)) => Value::String(b.to_string()),
        Some(Value::Number(n)) => Value::String(n.to_string()),
        Some(other) => Value::String(other.to_string()),
    };
    Some(out)
}

/// Client -> Database. Mirrors [`serialize`].
pub(super) fn deserialize(value: Option<&Value>, spec: &FieldSpec) -> Option<Value> {
    serialize(value, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> FieldSpec {
        FieldSpec::new("string")
    }

    #[test]
    fn test_string_unchanged() {
        assert_eq!(serialize(Some(&json!("jamie")), &spec()), Some(json!("jamie")));
        assert_eq!(serialize(Some(&json!("")), &spec()), Some(json!("")));
    }

    #[test]
    fn test_absent_and_null_become_null() {
        assert_eq!(serialize(None, &spec()), Some(Value::Null));
        assert_eq!(serialize(Some(&Value::Null), &spec()), Some(Value::Null));
    }

    #[test]
    fn test_scalars_stringify() {
        assert_eq!(serialize(Some(&json!(123)), &spec()), Some(json!("123")));
        assert_eq!(serialize(Some(&json!(1.5)), &spec()), Some(json!("1.5")));
        assert_eq!(serialize(Some(&json!(true)), &spec()), Some(json!("true")));
    }

    #[test]
    fn test_structured_values_stringify_to_json_text() {
        assert_eq!(serialize(Some(&json!([1, 2])), &spec()), Some(json!("[1,2]")));
        assert_eq!(serialize(Some(&json!({"a": 1})), &spec()), Some(json!("{\"a\":1}")));
    }
}
