//! List engine for tabula screens.
//!
//! Turns an owned record sequence plus per-screen state into the page a
//! user sees. Every read runs the same pipeline:
//!
//! ```text
//! RecordStore -> query (search + column filter) -> sort -> paginate
//! ```
//!
//! [`ListScreen`] bundles one screen's store and state. The stage functions
//! ([`filter_records`], [`sort_records`], [`paginate`]) are pure and usable
//! on their own.

pub mod columns;
pub mod config;
pub mod error;
pub mod export;
pub mod pagination;
pub mod query;
pub mod screen;
pub mod selection;
pub mod sort;
pub mod store;

pub use columns::{ColumnLayout, ColumnPreferences};
pub use config::ScreenConfig;
pub use error::{ConfigError, EngineError, Result, ScreenError};
pub use export::{ExportAdapter, ExportTable};
pub use pagination::{Page, paginate, range_label, total_pages};
pub use query::{SearchScope, filter_records, filter_records_in};
pub use screen::{ListScreen, RowView, ViewSnapshot};
pub use selection::{BatchAction, SelectionManager};
pub use sort::{compare_values, sort_records};
pub use store::RecordStore;
