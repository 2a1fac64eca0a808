//! Export table materialization.
//!
//! The engine decides which rows and columns leave the screen and hands an
//! adapter a fully stringified table. Serialization, file naming, and
//! delivery belong to the adapter.

use serde::Serialize;
use tabula_model::{ColumnDef, Record};

/// Headers plus rows of stringified cells in the same column order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Stringify `records` against `columns`, using column labels as headers.
    pub fn materialize<'a, R>(records: R, columns: &[&ColumnDef]) -> Self
    where
        R: IntoIterator<Item = &'a Record>,
    {
        let headers = columns.iter().map(|c| c.label.clone()).collect();
        let rows = records
            .into_iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.display(c.field_name()))
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when there are no data rows. Headers may still be present.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Receives a materialized table and serializes it somewhere.
///
/// An empty table must still produce a header-only document.
pub trait ExportAdapter {
    type Error;

    fn write_table(&mut self, table: &ExportTable) -> Result<(), Self::Error>;
}

/// Collects exported tables in memory.
impl ExportAdapter for Vec<ExportTable> {
    type Error = std::convert::Infallible;

    fn write_table(&mut self, table: &ExportTable) -> Result<(), Self::Error> {
        self.push(table.clone());
        Ok(())
    }
}
