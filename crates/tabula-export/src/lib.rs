//! Spreadsheet export for tabula list screens.
//!
//! Implements the engine's [`ExportAdapter`](tabula_engine::ExportAdapter)
//! as a delimited (CSV or TSV) writer, plus file naming helpers.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tabula_engine::ExportTable;
//! use tabula_export::{SpreadsheetFormat, write_export_file};
//!
//! let table = ExportTable {
//!     headers: vec!["Client".to_string()],
//!     rows: vec![vec!["Acme".to_string()]],
//! };
//! write_export_file(Path::new("clients.csv"), &table, SpreadsheetFormat::Csv)?;
//! # Ok::<(), tabula_export::ExportError>(())
//! ```

pub mod error;
pub mod format;
pub mod writer;

pub use error::{ExportError, Result};
pub use format::{SpreadsheetFormat, export_file_name};
pub use writer::{DelimitedExporter, export_to_string, write_export_file};
