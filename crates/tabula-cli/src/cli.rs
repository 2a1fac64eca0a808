//! CLI argument definitions for tabula.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabula",
    version,
    about = "Search, sort, page, select, and export tabular records",
    long_about = "Browse a record snapshot through a declared list screen.\n\n\
                  Records load from JSON or CSV. A screen configuration (TOML) names\n\
                  the identifier field, columns, defaults, and export policy."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "compact",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render one page of a list screen.
    View(ViewArgs),

    /// Export a list screen to a spreadsheet file.
    Export(ExportArgs),

    /// Show, change, or save a screen's column layout.
    Columns(ColumnsArgs),
}

/// Record source plus the query, sort, and column flags shared by commands.
#[derive(Args)]
pub struct ListArgs {
    /// Record snapshot (.json array of objects or .csv with a header row).
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    #[command(flatten)]
    pub screen: ScreenArgs,

    /// Case-insensitive free-text search.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Exact match on one field.
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filter: Option<(String, String)>,

    /// Sort by a column id.
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long = "desc", requires = "sort")]
    pub desc: bool,
}

/// Screen configuration and column layout flags.
#[derive(Args)]
pub struct ScreenArgs {
    /// Screen configuration (TOML).
    #[arg(long = "screen", value_name = "CONFIG")]
    pub config: PathBuf,

    /// Saved column layout (JSON) to apply before other column flags.
    #[arg(long = "layout", value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Hide a column (repeatable).
    #[arg(long = "hide", value_name = "COLUMN")]
    pub hide: Vec<String>,

    /// Show a column at the end of the visible list (repeatable).
    #[arg(long = "show", value_name = "COLUMN")]
    pub show: Vec<String>,
}

#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Page number, starting at 1. Out-of-range pages are clamped.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default: the screen's page_size; must be one of its
    /// page_size_options when declared).
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Select a record by identifier (repeatable).
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Select every row on the rendered page.
    #[arg(long = "select-page")]
    pub select_page: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Output file (default: <screen>_<date>.<ext> in the current directory).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Spreadsheet format (default: from the output extension, else csv).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub screen: ScreenArgs,

    /// Restore the screen's declared default layout first.
    #[arg(long = "reset")]
    pub reset: bool,

    /// Write the resulting layout to a JSON file.
    #[arg(long = "save", value_name = "FILE")]
    pub save: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let Some((field, value)) = raw.split_once('=') else {
        return Err(format!("expected FIELD=VALUE, got '{raw}'"));
    };
    let field = field.trim();
    if field.is_empty() {
        return Err("filter field is empty".to_string());
    }
    Ok((field.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_view_flags() {
        let cli = Cli::try_parse_from([
            "tabula",
            "view",
            "records.json",
            "--screen",
            "activities.toml",
            "--filter",
            "status=Scheduled",
            "--sort",
            "client",
            "--desc",
            "--hide",
            "notes",
            "--select",
            "4",
            "--select",
            "7",
        ])
        .unwrap();
        let Command::View(args) = cli.command else {
            panic!("expected view");
        };
        assert_eq!(
            args.list.filter,
            Some(("status".to_string(), "Scheduled".to_string()))
        );
        assert!(args.list.desc);
        assert_eq!(args.list.screen.hide, ["notes"]);
        assert_eq!(args.select, ["4", "7"]);
        assert_eq!(args.page, 1);
    }

    #[test]
    fn filter_needs_equals_sign() {
        assert!(parse_filter("status").is_err());
        assert!(parse_filter("=x").is_err());
        assert_eq!(
            parse_filter("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
    }
}
