//! Error types for the list engine.
//!
//! Query, sort, and pagination never fail. Errors come only from building a
//! record store, naming columns that do not exist, and loading screen
//! configuration.

use std::path::PathBuf;

use tabula_model::{ColumnId, ModelError, RecordId};
use thiserror::Error;

/// Errors raised by record stores, selections, and column preferences.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A record lacks a usable identifier value.
    #[error("record {index} has no usable '{field}' identifier")]
    MissingIdentifier { index: usize, field: String },

    /// Two records share an identifier.
    #[error("duplicate record identifier '{id}'")]
    DuplicateIdentifier { id: RecordId },

    /// No record with this identifier exists.
    #[error("record '{id}' not found")]
    RecordNotFound { id: RecordId },

    /// Column is not declared on this screen.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: ColumnId },

    /// Rows-per-page choice is not among the screen's options.
    #[error("page size {page_size} is not offered (choose one of {options:?})")]
    PageSizeNotOffered {
        page_size: usize,
        options: Vec<usize>,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Errors raised when loading or validating a screen configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read screen config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration or layout file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode a layout for saving.
    #[error("failed to encode column layout: {message}")]
    Encode { message: String },

    /// Configuration is not valid TOML or does not match the schema.
    #[error("failed to parse screen config: {message}")]
    Parse { message: String },

    /// Configuration parsed but violates a screen invariant.
    #[error("invalid screen config '{screen}': {reason}")]
    Invalid { screen: String, reason: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Errors raised while mounting a list screen.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::MissingIdentifier {
            index: 3,
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "record 3 has no usable 'id' identifier");

        let err = EngineError::DuplicateIdentifier {
            id: RecordId::from(7),
        };
        assert_eq!(err.to_string(), "duplicate record identifier '7'");
    }

    #[test]
    fn test_error_from_model() {
        let err: EngineError = ModelError::ZeroPageSize.into();
        assert!(matches!(err, EngineError::Model(ModelError::ZeroPageSize)));
    }
}
