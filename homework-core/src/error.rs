//! Error types for response validation and rendering

use thiserror::Error;

/// Result type alias for validation and rendering
pub type Result<T> = std::result::Result<T, StatusError>;

/// Errors raised while interpreting a homework status response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// The response body is not a JSON object
    #[error("API response must be an object, got {0}")]
    NotAnObject(&'static str),

    /// A required top-level key is absent
    #[error("API response is missing required key: {0}")]
    MissingKey(&'static str),

    /// `homeworks` is present but is not an array
    #[error("homeworks in API response must be a list, got {0}")]
    HomeworksNotList(&'static str),

    /// A submission record lacks a field, or the field is null
    #[error("submission is missing expected key: {0}")]
    MissingField(&'static str),

    /// A submission field holds a value of the wrong type
    #[error("submission field {field} must be a string, got {found}")]
    InvalidField {
        field: &'static str,
        found: &'static str,
    },

    /// The status code is not one of the recognised review states
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}

impl StatusError {
    /// Check if this error comes from a value of the wrong JSON type
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::NotAnObject(_) | Self::HomeworksNotList(_) | Self::InvalidField { .. }
        )
    }
}

/// Name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
