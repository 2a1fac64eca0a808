//! Delimited spreadsheet writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tabula_engine::{ExportAdapter, ExportTable};
use tracing::{debug, info};

use crate::error::{ExportError, Result};
use crate::format::SpreadsheetFormat;

/// Writes export tables as CSV or TSV to any [`Write`] sink.
///
/// Every table produces a header row, so an empty table still yields a
/// valid header-only spreadsheet. A table with no columns is rejected.
/// Consecutive tables may differ in width.
pub struct DelimitedExporter<W: Write> {
    writer: csv::Writer<W>,
    format: SpreadsheetFormat,
    rows_written: usize,
}

impl<W: Write> DelimitedExporter<W> {
    pub fn new(sink: W, format: SpreadsheetFormat) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(format.delimiter())
            .has_headers(false)
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(sink);
        Self {
            writer,
            format,
            rows_written: 0,
        }
    }

    pub fn format(&self) -> SpreadsheetFormat {
        self.format
    }

    /// Data rows written so far, across every table.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| {
                let source = err.error();
                ExportError::Flush(std::io::Error::new(source.kind(), source.to_string()))
            })
    }

    fn write(&mut self, table: &ExportTable) -> Result<()> {
        let expected = table.column_count();
        if expected == 0 {
            return Err(ExportError::NoColumns {
                rows: table.row_count(),
            });
        }
        if let Some((row, cells)) = table
            .rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(ExportError::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        }

        self.writer.write_record(&table.headers)?;
        for row in &table.rows {
            self.writer.write_record(row)?;
        }
        self.writer.flush()?;
        self.rows_written += table.row_count();
        debug!(
            format = %self.format,
            rows = table.row_count(),
            columns = expected,
            "wrote delimited table"
        );
        Ok(())
    }
}

impl<W: Write> ExportAdapter for DelimitedExporter<W> {
    type Error = ExportError;

    fn write_table(&mut self, table: &ExportTable) -> Result<()> {
        self.write(table)
    }
}

/// Serialize `table` to a new file at `path`, replacing any existing file.
///
/// A table with no columns fails before the file is created.
pub fn write_export_file(path: &Path, table: &ExportTable, format: SpreadsheetFormat) -> Result<()> {
    if table.column_count() == 0 {
        return Err(ExportError::NoColumns {
            rows: table.row_count(),
        });
    }
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut exporter = DelimitedExporter::new(BufWriter::new(file), format);
    exporter.write_table(table)?;
    exporter.into_inner()?.flush()?;
    info!(
        path = %path.display(),
        rows = table.row_count(),
        "export file written"
    );
    Ok(())
}

/// Serialize `table` into an in-memory string.
pub fn export_to_string(table: &ExportTable, format: SpreadsheetFormat) -> Result<String> {
    let mut exporter = DelimitedExporter::new(Vec::new(), format);
    exporter.write_table(table)?;
    let bytes = exporter.into_inner()?;
    // Cells come from Rust strings, so the output is valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
