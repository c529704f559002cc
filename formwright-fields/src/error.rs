//! Error types for the form model

use thiserror::Error;

/// Result type for model parsing operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur when building model values from text
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Identifier is not a valid ULID
    #[error("invalid {kind} id '{value}': {source}")]
    InvalidId {
        kind: &'static str,
        value: String,
        source: ulid::DecodeError,
    },

    /// Unknown field kind name
    #[error("unknown field kind: {name}")]
    UnknownKind { name: String },

    /// Unknown value for an enumerated attribute (label size, boolean variant)
    #[error("invalid value for {attribute}: {value}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },
}

impl FieldsError {
    /// Create an unknown kind error
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::UnknownKind { name: name.into() }
    }

    /// Create an invalid attribute error
    pub fn invalid_attribute(attribute: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute,
            value: value.into(),
        }
    }
}
