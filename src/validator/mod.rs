//! Field validation against a model's declared rules.
//!
//! # Design Principles
//!
//! - Validation failures are returned as ordinary data in declaration order;
//!   `validate` never raises
//! - Validator functions (including externally supplied ones) run behind a
//!   catch boundary: a panic degrades to a detail string
//! - Normalization unwraps the client envelope using the same root-key
//!   convention the serializer wraps with

mod errors;
mod rules;

pub use errors::ValidationError;
pub use rules::{validate_value, FieldValidator, Validation};

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{FieldSpec, Model, Record};
use crate::naming::{pluralize, NameCache};

/// A client payload recovered from its envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Single record, found under the singular root key
    One(Map<String, Value>),
    /// Multiple records, found under the plural root key
    Many(Vec<Value>),
}

/// Validates raw value bags against a model's field rules.
pub struct Validator {
    model: Arc<Model>,
    root_key: String,
    root_key_plural: String,
}

impl Validator {
    /// Creates a validator rooted at the model's name.
    pub fn new(model: Arc<Model>, names: &NameCache) -> Self {
        let root_key = model.name().to_string();
        Self::with_root_key(model, root_key, names)
    }

    /// Creates a validator with an explicit envelope root key.
    pub fn with_root_key(model: Arc<Model>, root_key: impl Into<String>, names: &NameCache) -> Self {
        let root_key = root_key.into();
        let root_key_plural = pluralize(names, &root_key);
        Self {
            model,
            root_key,
            root_key_plural,
        }
    }

    /// The model this validator enforces.
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Validates a raw value bag.
    ///
    /// Every declared field is checked in declaration order; only failures
    /// appear in the result. An empty result means the payload is ready for
    /// deserialization.
    pub fn validate(&self, values: &Map<String, Value>) -> Vec<ValidationError> {
        let mut failures = Vec::new();

        for (name, spec) in self.model.fields() {
            let value = values.get(name);
            if let Some(detail) = self.validate_field(value, spec) {
                failures.push(ValidationError {
                    detail,
                    property_name: name.clone(),
                    property_value: value.cloned(),
                });
            }
        }

        debug!(
            model = self.model.name(),
            failures = failures.len(),
            "validated payload"
        );
        failures
    }

    /// Validates an already-created record.
    pub fn validate_record(&self, record: &Record<'_>) -> Vec<ValidationError> {
        self.validate(record.data())
    }

    /// Validates a single value against a field spec.
    ///
    /// Returns `None` on success, or the failure detail. An absent value
    /// fails only when the field is required. The validator function runs
    /// behind a catch boundary so a panicking custom validator degrades to
    /// its message instead of unwinding through the request.
    pub fn validate_field(&self, value: Option<&Value>, spec: &FieldSpec) -> Option<String> {
        let data_type = &spec.data_type;

        let Some(value) = value else {
            return spec
                .required
                .then(|| format!("Field is required with dataType {data_type}."));
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| match spec.validator {
            Some(custom) => custom(value, spec),
            None => rules::validate_value(data_type, value, spec),
        }));

        match outcome {
            Ok(Validation::Valid) => None,
            Ok(Validation::Detail(detail)) => Some(detail),
            Ok(Validation::Invalid) => Some(format!(
                "{} validation failed for {}",
                data_type,
                rules::display_value(value)
            )),
            Err(panic) => Some(panic_detail(panic)),
        }
    }

    /// Unwraps a client envelope back to its raw payload.
    ///
    /// An object under the singular root key wins over an array under the
    /// plural key; no match yields `None`. A non-object envelope yields an
    /// empty singular payload.
    pub fn normalize(&self, raw: &Value) -> Option<Payload> {
        let Some(envelope) = raw.as_object() else {
            return Some(Payload::One(Map::new()));
        };

        if let Some(one) = envelope.get(&self.root_key).and_then(Value::as_object) {
            return Some(Payload::One(one.clone()));
        }
        if let Some(many) = envelope.get(&self.root_key_plural).and_then(Value::as_array) {
            return Some(Payload::Many(many.clone()));
        }

        None
    }
}

fn panic_detail(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "validator panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldSpec;
    use indexmap::indexmap;
    use serde_json::json;

    fn person_validator() -> Validator {
        let model = Arc::new(Model::new(
            "person",
            indexmap! {
                "id".to_string() => FieldSpec::new("bigint").primary_key(),
                "name".to_string() => FieldSpec::new("string").required().max(32.0),
                "age".to_string() => FieldSpec::new("smallint"),
                "born_on".to_string() => FieldSpec::new("date"),
            },
        ));
        Validator::new(model, &NameCache::new())
    }

    fn values(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_all_optional_empty_input_passes() {
        let model = Arc::new(Model::new(
            "tag",
            indexmap! {
                "label".to_string() => FieldSpec::new("string"),
                "weight".to_string() => FieldSpec::new("int"),
            },
        ));
        let validator = Validator::new(model, &NameCache::new());
        assert!(validator.validate(&Map::new()).is_empty());
    }

    #[test]
    fn test_smallint_overflow_produces_exact_detail() {
        let validator = person_validator();
        let failures = validator.validate(&values(json!({ "name": "ok", "age": 100000 })));

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].detail, "smallint validation failed for 100000");
        assert_eq!(failures[0].property_name, "age");
        assert_eq!(failures[0].property_value, Some(json!(100000)));
    }

    #[test]
    fn test_required_field_missing() {
        let validator = person_validator();
        let failures = validator.validate(&Map::new());

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].detail, "Field is required with dataType string.");
        assert_eq!(failures[0].property_name, "name");
        assert_eq!(failures[0].property_value, None);
    }

    #[test]
    fn test_failures_follow_declaration_order() {
        let validator = person_validator();
        let failures = validator.validate(&values(json!({
            "age": 100000,
            "born_on": "not a date",
            "id": "abc"
        })));

        let names: Vec<_> = failures.iter().map(|f| f.property_name.as_str()).collect();
        assert_eq!(names, ["id", "name", "age", "born_on"]);
    }

    #[test]
    fn test_validate_and_serialize_fail_independently() {
        // the validator reports a detail for an unparseable date while the
        // serializer maps the same input to null
        let validator = person_validator();
        let spec = FieldSpec::new("date");

        let detail = validator.validate_field(Some(&json!("i am not a date bro")), &spec);
        assert_eq!(
            detail,
            Some("date validation failed for i am not a date bro".to_string())
        );

        let serialized = crate::transform::serialize(
            &spec.data_type,
            Some(&json!("i am not a date bro")),
            &spec,
        );
        assert_eq!(serialized, Some(Value::Null));
    }

    #[test]
    fn test_unknown_data_type_reports_no_validator() {
        let validator = person_validator();
        let spec = FieldSpec::new("uuid");

        assert_eq!(
            validator.validate_field(Some(&json!("abc")), &spec),
            Some("Cannot validate abc. No validator for uuid".to_string())
        );
    }

    #[test]
    fn test_array_data_types_have_no_validator() {
        let validator = person_validator();
        let spec = FieldSpec::new("array:int");

        assert_eq!(
            validator.validate_field(Some(&json!([1, 2])), &spec),
            Some("Cannot validate [1,2]. No validator for array:int".to_string())
        );
    }

    #[test]
    fn test_custom_validator_detail_is_verbatim() {
        fn no_admin(value: &Value, _spec: &FieldSpec) -> Validation {
            if value == &json!("admin") {
                Validation::Detail("admin is reserved".to_string())
            } else {
                Validation::Valid
            }
        }

        let validator = person_validator();
        let spec = FieldSpec::new("string").validator(no_admin);

        assert_eq!(validator.validate_field(Some(&json!("jamie")), &spec), None);
        assert_eq!(
            validator.validate_field(Some(&json!("admin")), &spec),
            Some("admin is reserved".to_string())
        );
    }

    #[test]
    fn test_panicking_validator_degrades_to_detail() {
        fn explodes(_value: &Value, _spec: &FieldSpec) -> Validation {
            panic!("boom from user validation");
        }

        let validator = person_validator();
        let spec = FieldSpec::new("string").validator(explodes);

        assert_eq!(
            validator.validate_field(Some(&json!("x")), &spec),
            Some("boom from user validation".to_string())
        );
    }

    #[test]
    fn test_validate_record_checks_resolved_values() {
        let model = Arc::new(Model::new(
            "person",
            indexmap! {
                "name".to_string() => FieldSpec::new("string").required(),
                "age".to_string() => FieldSpec::new("smallint").default_value(json!(100000)),
            },
        ));
        let validator = Validator::new(Arc::clone(&model), &NameCache::new());

        // the record resolves the (out-of-range) default, so the record
        // fails where the raw bag passed
        let raw = values(json!({ "name": "jamie" }));
        assert!(validator.validate(&raw).is_empty());

        let record = model.create_record(&raw);
        let failures = validator.validate_record(&record);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].property_name, "age");
    }

    #[test]
    fn test_normalize_singular_and_plural() {
        let validator = person_validator();

        let one = validator
            .normalize(&json!({ "person": { "name": "jamie" } }))
            .unwrap();
        assert_eq!(one, Payload::One(values(json!({ "name": "jamie" }))));

        let many = validator
            .normalize(&json!({ "people": [{ "name": "alice" }, { "name": "ines" }] }))
            .unwrap();
        assert_eq!(
            many,
            Payload::Many(vec![json!({ "name": "alice" }), json!({ "name": "ines" })])
        );
    }

    #[test]
    fn test_normalize_no_matching_root_key() {
        let validator = person_validator();
        assert_eq!(validator.normalize(&json!({ "dog": {} })), None);
        // wrong shape under a matching key is not a payload
        assert_eq!(validator.normalize(&json!({ "person": [1, 2] })), None);
        assert_eq!(validator.normalize(&json!({ "people": {} })), None);
    }

    #[test]
    fn test_normalize_non_object_envelope_yields_empty_payload() {
        let validator = person_validator();
        assert_eq!(
            validator.normalize(&json!("junk")),
            Some(Payload::One(Map::new()))
        );
    }
}
