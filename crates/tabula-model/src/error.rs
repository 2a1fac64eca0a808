//! Error types for the list data model.

use thiserror::Error;

/// Errors raised when constructing model values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Column identifiers must be non-blank.
    #[error("invalid column id: '{0}'")]
    InvalidColumnId(String),

    /// Record identifiers must be non-blank scalars.
    #[error("invalid record id: '{0}'")]
    InvalidRecordId(String),

    /// Page sizes must be positive.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// Unrecognized keyword in a parsed option.
    #[error("invalid {field} value '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
