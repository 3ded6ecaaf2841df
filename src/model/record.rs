//! Record: a model-conformant snapshot of field values.

use serde_json::{Map, Value};

use super::Model;

/// An immutable snapshot of values produced from a model plus a raw value
/// bag, filtered to declared fields with defaults applied.
///
/// Built only through [`Model::create_record`]; never mutated after
/// construction. The `data` mapping is exactly what the persistence layer
/// should store.
#[derive(Debug, Clone)]
pub struct Record<'m> {
    model: &'m Model,
    data: Map<String, Value>,
}

impl<'m> Record<'m> {
    pub(super) fn new(model: &'m Model, data: Map<String, Value>) -> Self {
        Self { model, data }
    }

    /// The model this record conforms to.
    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// The field values, keyed by declared field name.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Consumes the record, yielding the value mapping for persistence.
    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    /// Returns the value for `field`, if one was provided or defaulted.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}
