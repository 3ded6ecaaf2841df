//! Field-level type definitions.
//!
//! A field's logical data type is a closed enumeration rather than a raw
//! string: dispatch over it in the transform and validation registries is
//! exhaustive and compiler-checked, with an explicit `Unknown` variant that
//! carries the original string for diagnostic messages.

use std::fmt;

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value;

use crate::validator::FieldValidator;

/// Logical element types supported by the transform and validation tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Arbitrary numeric value
    Number,
    /// 32-bit signed integer
    Int,
    /// 16-bit signed integer
    SmallInt,
    /// 64-bit signed integer
    BigInt,
    /// UTF-8 string
    String,
    /// Boolean
    Boolean,
    /// Calendar date/time
    Date,
    /// Unrecognized type name, kept verbatim for diagnostics
    Unknown(String),
}

impl ScalarType {
    /// Maps a declaration name to its scalar type.
    pub fn parse(name: &str) -> Self {
        match name {
            "number" => ScalarType::Number,
            "int" => ScalarType::Int,
            "smallint" => ScalarType::SmallInt,
            "bigint" => ScalarType::BigInt,
            "string" => ScalarType::String,
            "boolean" => ScalarType::Boolean,
            "date" => ScalarType::Date,
            other => ScalarType::Unknown(other.to_string()),
        }
    }

    /// Returns the declaration name for error messages.
    pub fn name(&self) -> &str {
        match self {
            ScalarType::Number => "number",
            ScalarType::Int => "int",
            ScalarType::SmallInt => "smallint",
            ScalarType::BigInt => "bigint",
            ScalarType::String => "string",
            ScalarType::Boolean => "boolean",
            ScalarType::Date => "date",
            ScalarType::Unknown(name) => name,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field's declared data type: a scalar, or a homogeneous sequence whose
/// elements are each handled against the scalar.
///
/// The declaration form is the bare scalar name (`"int"`) or the array form
/// (`"array:int"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataType {
    /// Element type
    pub scalar: ScalarType,
    /// Whether the value is a sequence of `scalar`
    pub array: bool,
}

impl DataType {
    /// A bare scalar type.
    pub fn scalar(scalar: ScalarType) -> Self {
        Self { scalar, array: false }
    }

    /// An array-of-scalar type.
    pub fn array(scalar: ScalarType) -> Self {
        Self { scalar, array: true }
    }

    /// Parses a declaration string. Never fails: unrecognized names become
    /// `ScalarType::Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix("array:") {
            Some(element) => Self::array(ScalarType::parse(element)),
            None => Self::scalar(ScalarType::parse(raw)),
        }
    }
}

impl From<&str> for DataType {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.array {
            write!(f, "array:{}", self.scalar)
        } else {
            write!(f, "{}", self.scalar)
        }
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(DataType::parse(&raw))
    }
}

/// Default applied when a field has no provided value: a literal, or a
/// function invoked at record-creation time.
#[derive(Clone)]
pub enum DefaultValue {
    /// Used verbatim
    Literal(Value),
    /// Invoked per record
    Computed(fn() -> Value),
}

impl DefaultValue {
    /// Resolves the default to a concrete value.
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Computed(compute) => compute(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Literal(value)
    }
}

impl<'de> Deserialize<'de> for DefaultValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(DefaultValue::Literal(Value::deserialize(deserializer)?))
    }
}

/// Per-field declaration: data type, constraints, default, primary-key flag.
///
/// Specs deserialize from JSON declarations (`dataType`, `required`,
/// `primaryKey`, `defaultValue`, `min`, `max`); custom validators are only
/// attachable programmatically.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Declared data type
    pub data_type: DataType,
    /// Whether a value must be supplied
    #[serde(default)]
    pub required: bool,
    /// Whether this field is the record's primary key
    #[serde(default)]
    pub primary_key: bool,
    /// Default applied when no value is provided
    #[serde(default)]
    pub default_value: Option<DefaultValue>,
    /// Lower bound (length for strings, value for numerics); replaces the
    /// type default entirely when set
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound; replaces the type default entirely when set
    #[serde(default)]
    pub max: Option<f64>,
    /// Custom validator run in place of the built-in type rule
    #[serde(skip)]
    pub validator: Option<FieldValidator>,
}

impl FieldSpec {
    /// Creates a spec with the given data type and no constraints.
    pub fn new(data_type: impl Into<DataType>) -> Self {
        Self {
            data_type: data_type.into(),
            required: false,
            primary_key: false,
            default_value: None,
            min: None,
            max: None,
            validator: None,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets a literal default value.
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets a computed default, invoked once per created record.
    pub fn computed_default(mut self, compute: fn() -> Value) -> Self {
        self.default_value = Some(DefaultValue::Computed(compute));
        self
    }

    /// Sets the lower bound, replacing the type default.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound, replacing the type default.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Attaches a custom validator.
    pub fn validator(mut self, validator: FieldValidator) -> Self {
        self.validator = Some(validator);
        self
    }
}
