//! Errors raised while constructing typed token values.

use thiserror::Error;

/// Errors that can occur when a raw `$value` is parsed into a [`crate::TokenValue`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("unknown token type '{name}'")]
    UnknownType { name: String },

    #[error("token has no $type and its shape does not identify one")]
    Untyped,

    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
    },

    #[error("field '{field}' is not numeric")]
    NonNumeric { field: String },

    #[error("field '{field}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("unit '{unit}' is not one of {allowed}")]
    InvalidUnit { unit: String, allowed: &'static str },

    #[error("invalid color: {detail}")]
    InvalidColor { detail: String },

    #[error("'{name}' is not a recognized {kind}")]
    UnknownKeyword { kind: &'static str, name: String },
}

impl ValueError {
    /// Whether this error means "could not classify" rather than "malformed".
    pub fn is_untyped(&self) -> bool {
        matches!(self, ValueError::Untyped)
    }

    pub(crate) fn expected(expected: &'static str, found: &serde_json::Value) -> Self {
        ValueError::Expected {
            expected,
            found: describe_json(found).to_string(),
        }
    }
}

/// Short human name for the JSON kind of a value.
pub fn describe_json(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
