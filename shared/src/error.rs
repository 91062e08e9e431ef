//! Error types for the shared crate

use thiserror::Error;

/// Client-side validation failure, raised before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Required fields left blank (labels, in form order)
    #[error("Required fields missing: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    /// A numeric field holds text that is not a number
    #[error("{label} must be a number (got \"{value}\")")]
    InvalidNumber { label: String, value: String },

    /// Key is not part of the collection schema
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Result type for form operations
pub type FormResult<T> = Result<T, FormError>;
