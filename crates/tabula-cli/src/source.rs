//! Record snapshot loading.
//!
//! A snapshot is either a JSON array of flat objects or a CSV file with a
//! header row. CSV cells are inferred with [`parse_scalar`], so `"42"` loads
//! as an integer and an empty cell as null. A cell is never split into a
//! list.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tabula_model::{Record, parse_scalar};
use tracing::debug;

/// Snapshot file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    /// Detect the format from the file extension.
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => bail!(
                "unsupported record file {} (expected .json or .csv)",
                path.display()
            ),
        }
    }
}

/// Load every record from `path`.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let format = SourceFormat::detect(path)?;
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let records = match format {
        SourceFormat::Json => read_json(file),
        SourceFormat::Csv => read_csv(file),
    }
    .with_context(|| format!("read records from {}", path.display()))?;
    debug!(
        path = %path.display(),
        records = records.len(),
        ?format,
        "loaded record snapshot"
    );
    Ok(records)
}

/// Parse a JSON array of flat objects.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Record>> {
    let records: Vec<Record> =
        serde_json::from_reader(reader).context("expected a JSON array of flat objects")?;
    Ok(records)
}

/// Parse CSV with a header row.
///
/// Blank header cells are skipped. Short rows leave the trailing fields
/// absent.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("read CSV header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        bail!("CSV header row is empty");
    }

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("read CSV row {}", line + 1))?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, cell)| (header.clone(), parse_scalar(cell)))
            .collect();
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_model::Value;

    #[test]
    fn csv_cells_are_inferred() {
        let data = "id,client,amount,active,code,notes\n1,Acme,2.5,true,007,\n";
        let records = read_csv(data.as_bytes()).unwrap();
        let record = &records[0];
        assert_eq!(record.get("id"), Some(&Value::Int(1)));
        assert_eq!(record.get("amount"), Some(&Value::Float(2.5)));
        assert_eq!(record.get("active"), Some(&Value::Bool(true)));
        assert_eq!(record.get("code"), Some(&Value::Text("007".into())));
        assert_eq!(record.get("notes"), Some(&Value::Null));
    }

    #[test]
    fn short_csv_rows_omit_fields() {
        let data = "id,client,status\n1,Acme\n";
        let records = read_csv(data.as_bytes()).unwrap();
        assert!(!records[0].has_field("status"));
    }

    #[test]
    fn json_objects_keep_types() {
        let data = r#"[{"id": 3, "tags": ["a", "b"], "score": null}]"#;
        let records = read_json(data.as_bytes()).unwrap();
        assert_eq!(records[0].display("tags"), "a, b");
        assert_eq!(records[0].get("score"), Some(&Value::Null));
    }

    #[test]
    fn detects_by_extension() {
        assert_eq!(
            SourceFormat::detect(Path::new("a/b.JSON")).unwrap(),
            SourceFormat::Json
        );
        assert!(SourceFormat::detect(Path::new("records.xlsx")).is_err());
    }
}
