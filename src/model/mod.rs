//! Declarative model definitions.
//!
//! A model names a record type and maps field names to specs (data type,
//! required flag, default, bounds, primary-key flag). Models are constructed
//! once, immutable thereafter, and shared by reference across the serializer
//! and validator instances that use them.
//!
//! # Design Principles
//!
//! - Field declaration order is preserved and load-bearing: derived field
//!   lists, validation output, and serialized payloads all follow it
//! - The model holds metadata only; validation logic lives in the validator
//! - Malformed declarations fail at construction, not at request time

mod errors;
mod fields;
mod record;

pub use errors::{ModelError, ModelResult};
pub use fields::{DataType, DefaultValue, FieldSpec, ScalarType};
pub use record::Record;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// The primary-key field, when one is declared.
#[derive(Debug, Clone)]
pub struct PrimaryKey {
    /// Declared field name
    pub name: String,
    /// The field's spec
    pub spec: FieldSpec,
}

/// A named, ordered collection of field specs.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    fields: IndexMap<String, FieldSpec>,
    fields_list: Vec<String>,
    primary_key: Option<PrimaryKey>,
}

impl Model {
    /// Creates a model from a name and ordered field specs.
    ///
    /// At most one field should be marked primary key; when several are, the
    /// first in declaration order wins.
    pub fn new(name: impl Into<String>, fields: IndexMap<String, FieldSpec>) -> Self {
        let fields_list = fields
            .iter()
            .filter(|(_, spec)| !spec.primary_key)
            .map(|(name, _)| name.clone())
            .collect();

        let primary_key = fields
            .iter()
            .find(|(_, spec)| spec.primary_key)
            .map(|(name, spec)| PrimaryKey {
                name: name.clone(),
                spec: spec.clone(),
            });

        Self {
            name: name.into(),
            fields,
            fields_list,
            primary_key,
        }
    }

    /// Builds a model from a JSON declaration of the form
    /// `{ "name": ..., "fields": { <field>: <spec>, ... } }`.
    ///
    /// Fails fast when `name` is not a string, `fields` is not an object, or
    /// any field spec is malformed.
    pub fn from_declaration(declaration: &Value) -> ModelResult<Self> {
        let root = declaration
            .as_object()
            .ok_or(ModelError::DeclarationNotAnObject)?;

        let name = root
            .get("name")
            .and_then(Value::as_str)
            .ok_or(ModelError::NameNotAString)?;

        let raw_fields = root
            .get("fields")
            .and_then(Value::as_object)
            .ok_or(ModelError::FieldsNotAnObject)?;

        let mut fields = IndexMap::with_capacity(raw_fields.len());
        for (field, spec) in raw_fields {
            let spec = serde_json::from_value(spec.clone()).map_err(|source| {
                ModelError::InvalidFieldSpec {
                    field: field.clone(),
                    source,
                }
            })?;
            fields.insert(field.clone(), spec);
        }

        Ok(Self::new(name, fields))
    }

    /// The model name; doubles as the default envelope root key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &IndexMap<String, FieldSpec> {
        &self.fields
    }

    /// Field names in declaration order, primary key excluded.
    pub fn fields_list(&self) -> &[String] {
        &self.fields_list
    }

    /// The primary-key descriptor, when one is declared.
    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    /// Builds a [`Record`] from a raw value bag.
    ///
    /// For every declared field the provided value is taken when present;
    /// otherwise a declared default is resolved (computed defaults are
    /// invoked). Fields with neither are omitted entirely, and keys not
    /// declared on the model are silently dropped.
    pub fn create_record(&self, values: &Map<String, Value>) -> Record<'_> {
        let mut data = Map::new();

        for (name, spec) in &self.fields {
            let value = values
                .get(name)
                .cloned()
                .or_else(|| spec.default_value.as_ref().map(DefaultValue::resolve));

            if let Some(value) = value {
                data.insert(name.clone(), value);
            }
        }

        Record::new(self, data)
    }
}
