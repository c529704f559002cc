//! Error types for the template and submission stores

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in store operations
///
/// Missing ids are not errors: mutations against an unknown template,
/// section or field return [`crate::Outcome::Unchanged`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Template limit reached; the collection is left unchanged
    #[error("maximum of {limit} templates allowed")]
    CapacityExceeded { limit: usize },

    /// Submission contained no non-empty values for the template's fields
    #[error("no data to submit")]
    EmptySubmission,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl StoreError {
    /// Whether the caller can fix this by changing its input
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. } | Self::EmptySubmission)
    }
}
