//! Data model for tabula list screens.
//!
//! This crate holds the plain types shared by the engine, the export
//! adapter, and the command-line front end:
//!
//! - [`Value`] and [`Record`]: loosely typed rows owned by a record store
//! - [`RecordId`] and [`ColumnId`]: validated identifiers
//! - [`QueryState`], [`SortState`], [`PageState`]: per-screen list state
//! - [`CheckState`]: tri-state of the page checkbox
//! - [`ExportScope`] and [`ExportColumns`]: declared export policy

pub mod column;
pub mod error;
pub mod export;
pub mod ids;
pub mod record;
pub mod state;
pub mod value;

pub use column::ColumnDef;
pub use error::{ModelError, Result};
pub use export::{ExportColumns, ExportScope};
pub use ids::{ColumnId, RecordId};
pub use record::Record;
pub use state::{
    CheckState, ColumnFilter, DEFAULT_PAGE_SIZE, PageState, QueryState, SortDirection, SortState,
};
pub use value::{LIST_SEPARATOR, Value, format_numeric, parse_f64, parse_scalar};
