//! Error types for spreadsheet export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while serializing an export table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("Failed to create export file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a header or data row.
    #[error("Failed to write export row: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to flush buffered output.
    #[error("Failed to flush export output: {0}")]
    Flush(#[from] std::io::Error),

    /// The table has no columns, so no spreadsheet can represent it.
    #[error("Nothing to export: no columns selected ({rows} row(s) matched)")]
    NoColumns { rows: usize },

    /// Header and row widths disagree.
    #[error("Row {row} has {found} cells but the table has {expected} headers")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
