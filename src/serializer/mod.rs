//! Row serialization into client envelopes.
//!
//! # Design Principles
//!
//! - The model is the projection boundary: only declared fields ever reach
//!   the client, whatever extra columns a row carries
//! - Field iteration order is declaration order, so output is byte-stable
//! - Sequences serialize under the pluralized root key, single rows under
//!   the singular one

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{DefaultValue, Model};
use crate::naming::{pluralize, NameCache};
use crate::transform;

/// Converts stored rows into client-facing envelopes, and validated client
/// payloads back into storage-shaped value bags.
pub struct Serializer {
    model: Arc<Model>,
    root_key: String,
    root_key_plural: String,
}

impl Serializer {
    /// Creates a serializer rooted at the model's name.
    pub fn new(model: Arc<Model>, names: &NameCache) -> Self {
        let root_key = model.name().to_string();
        Self::with_root_key(model, root_key, names)
    }

    /// Creates a serializer with an explicit envelope root key.
    pub fn with_root_key(model: Arc<Model>, root_key: impl Into<String>, names: &NameCache) -> Self {
        let root_key = root_key.into();
        let root_key_plural = pluralize(names, &root_key);
        Self {
            model,
            root_key,
            root_key_plural,
        }
    }

    /// The model this serializer projects through.
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// The singular envelope key.
    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    /// The plural envelope key.
    pub fn root_key_plural(&self) -> &str {
        &self.root_key_plural
    }

    /// Wraps row data in a client envelope.
    ///
    /// A sequence serializes element-wise under the plural root key; a single
    /// row under the singular key; anything else becomes an empty object
    /// under the singular key.
    pub fn serialize(&self, data: &Value) -> Value {
        let mut envelope = Map::new();

        match data {
            Value::Array(rows) => {
                debug!(
                    root_key = %self.root_key_plural,
                    rows = rows.len(),
                    "serializing row sequence"
                );
                let empty = Map::new();
                let items = rows
                    .iter()
                    .map(|row| Value::Object(self.serialize_one(row.as_object().unwrap_or(&empty))))
                    .collect();
                envelope.insert(self.root_key_plural.clone(), Value::Array(items));
            }
            Value::Object(row) => {
                debug!(root_key = %self.root_key, "serializing single row");
                envelope.insert(self.root_key.clone(), Value::Object(self.serialize_one(row)));
            }
            _ => {
                envelope.insert(self.root_key.clone(), Value::Object(Map::new()));
            }
        }

        Value::Object(envelope)
    }

    /// Serializes one row through the per-type transforms.
    ///
    /// Fields not declared on the model are never included; a declared field
    /// whose transform yields no representable value is omitted.
    pub fn serialize_one(&self, row: &Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::new();

        for (name, spec) in self.model.fields() {
            if let Some(value) = transform::serialize(&spec.data_type, row.get(name), spec) {
                out.insert(name.clone(), value);
            }
        }

        out
    }

    /// Coerces a validated client payload into a storage-shaped value bag.
    ///
    /// Supplied values run through the per-type deserialize transforms.
    /// Absent fields take their declared default when one exists, otherwise
    /// deserialize to `null`; an absent primary key is left to the store to
    /// generate.
    pub fn deserialize(&self, payload: &Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::new();

        for (name, spec) in self.model.fields() {
            let supplied = match payload.get(name) {
                Some(value) => Some(value.clone()),
                None if spec.primary_key => continue,
                None => spec.default_value.as_ref().map(DefaultValue::resolve),
            };

            match supplied {
                Some(value) => {
                    if let Some(coerced) =
                        transform::deserialize(&spec.data_type, Some(&value), spec)
                    {
                        out.insert(name.clone(), coerced);
                    }
                }
                None => {
                    out.insert(name.clone(), Value::Null);
                }
            }
        }

        out
    }
}
