//! Spreadsheet formats and export file naming.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Delimited spreadsheet flavours the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpreadsheetFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl SpreadsheetFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }

    /// Guess the format from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        ext.parse().ok()
    }
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SpreadsheetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "tab" => Ok(Self::Tsv),
            other => Err(format!("unknown spreadsheet format '{other}'")),
        }
    }
}

/// Default file name for a screen's export on `date`.
///
/// The screen name is reduced to lowercase ASCII alphanumerics with runs of
/// anything else collapsed to `_`. Produces `"<screen>_<YYYY-MM-DD>.<ext>"`.
pub fn export_file_name(screen: &str, date: NaiveDate, format: SpreadsheetFormat) -> String {
    let mut stem = String::with_capacity(screen.len());
    for ch in screen.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            stem.push(ch.to_ascii_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_end_matches('_');
    let stem = if stem.is_empty() { "export" } else { stem };
    format!(
        "{stem}_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn names_follow_screen_and_date() {
        assert_eq!(
            export_file_name("activities", day(), SpreadsheetFormat::Csv),
            "activities_2024-03-07.csv"
        );
        assert_eq!(
            export_file_name("  Slab Rates / EU ", day(), SpreadsheetFormat::Tsv),
            "slab_rates_eu_2024-03-07.tsv"
        );
        assert_eq!(
            export_file_name("***", day(), SpreadsheetFormat::Csv),
            "export_2024-03-07.csv"
        );
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("CSV".parse::<SpreadsheetFormat>(), Ok(SpreadsheetFormat::Csv));
        assert_eq!(
            SpreadsheetFormat::from_extension("tsv"),
            Some(SpreadsheetFormat::Tsv)
        );
        assert!("xlsx".parse::<SpreadsheetFormat>().is_err());
    }
}
