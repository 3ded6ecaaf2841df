//! Validation failure records.
//!
//! Validation failures are data, not exceptions: they accumulate into a
//! sequence the calling layer returns to the client as-is.

use serde::Serialize;
use serde_json::Value;

/// A single field validation failure.
///
/// Serializes to the wire shape `{ detail, propertyName, propertyValue }`;
/// `propertyValue` is omitted when the field was absent (a required-field
/// failure).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Human-readable failure detail
    pub detail: String,
    /// The declared field name
    pub property_name: String,
    /// The offending value, when one was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_value: Option<Value>,
}
