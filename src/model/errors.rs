//! Model construction errors.
//!
//! These are the fail-fast channel: a malformed declaration is a programmer
//! or configuration error and surfaces as an `Err` at construction time.
//! Data validation failures never appear here; they are ordinary values
//! collected by the validator.

use thiserror::Error;

/// Result type for model construction
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building a model from a declaration.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The declaration root is not an object
    #[error("model declaration must be an object with `name` and `fields`")]
    DeclarationNotAnObject,

    /// `name` is missing or not a string
    #[error("model `name` must be a string")]
    NameNotAString,

    /// `fields` is missing or not an object
    #[error("model `fields` must be an object")]
    FieldsNotAnObject,

    /// A field spec failed to parse
    #[error("invalid spec for field `{field}`: {source}")]
    InvalidFieldSpec {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_member() {
        assert!(ModelError::NameNotAString.to_string().contains("`name`"));
        assert!(ModelError::FieldsNotAnObject.to_string().contains("`fields`"));
    }
}
