use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span, warn};

use tabula_cli::render::{columns_table, footer, view_table};
use tabula_cli::source::load_records;
use tabula_engine::{ColumnLayout, ColumnPreferences, ListScreen, ScreenConfig};
use tabula_export::{SpreadsheetFormat, export_file_name, write_export_file};
use tabula_model::{ColumnFilter, ColumnId, RecordId, SortDirection, SortState, parse_scalar};

use crate::cli::{ColumnsArgs, ExportArgs, FormatArg, ListArgs, ScreenArgs, ViewArgs};

pub fn run_view(args: &ViewArgs) -> Result<()> {
    let mut screen = open_screen(&args.list)?;
    let _span = info_span!("view", screen = %screen.config().name).entered();

    if let Some(size) = args.page_size {
        screen
            .set_page_size(size)
            .context("invalid --page-size")?;
    }
    screen.go_to_page(args.page.saturating_sub(1));

    for raw in &args.select {
        let id = RecordId::new(raw.trim())
            .with_context(|| format!("invalid --select '{raw}'"))?;
        if !screen.store().contains(&id) {
            warn!(id = %id, "no record with this identifier");
        } else if !screen.is_selected(&id) {
            screen.toggle_row(&id);
        }
    }
    if args.select_page {
        screen.select_visible(true);
    }

    let view = screen.view();
    println!("{}", view_table(&view));
    println!("{}", footer(&view));
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let screen = open_screen(&args.list)?;
    let _span = info_span!("export", screen = %screen.config().name).entered();

    let format = resolve_format(args.format, args.output.as_deref());
    let path = match &args.output {
        Some(path) => path.clone(),
        None => PathBuf::from(export_file_name(
            &screen.config().name,
            Local::now().date_naive(),
            format,
        )),
    };

    let table = screen.export_table();
    write_export_file(&path, &table, format)
        .with_context(|| format!("export {}", path.display()))?;
    info!(
        scope = %screen.config().export_scope,
        rows = table.row_count(),
        "export complete"
    );
    println!(
        "Exported {} row(s) x {} column(s) to {}",
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let config = load_config(&args.screen.config)?;
    let mut prefs = ColumnPreferences::from_defs(&config.columns);
    if args.reset {
        prefs.reset_to_defaults();
        apply_column_moves(&mut prefs, &args.screen)?;
    } else {
        apply_column_flags(&mut prefs, &args.screen)?;
    }

    println!("{}", columns_table(&config, &prefs));
    if let Some(path) = &args.save {
        prefs
            .layout()
            .save(path)
            .with_context(|| format!("save layout {}", path.display()))?;
        println!("Saved layout to {}", path.display());
    }
    Ok(())
}

/// Load records and configuration and apply every shared list flag.
fn open_screen(args: &ListArgs) -> Result<ListScreen> {
    let config = load_config(&args.screen.config)?;
    let records = load_records(&args.records)?;
    let mut screen = ListScreen::new(config, records)
        .with_context(|| format!("mount screen with {}", args.records.display()))?;

    apply_column_flags(screen.columns_mut(), &args.screen)?;

    if let Some(term) = &args.search {
        screen.set_search(term.as_str());
    }
    if let Some((field, value)) = &args.filter {
        let filter = ColumnFilter::new(field.as_str(), parse_scalar(value));
        screen.set_column_filter(Some(filter));
    }
    if let Some(column) = &args.sort {
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        let id = ColumnId::new(column.as_str()).context("invalid --sort column")?;
        let key = screen.config().column(&id).map(|def| def.field_name().to_string());
        match key {
            Some(key) => screen.set_sort(SortState::by(key, direction)),
            None => warn!(column = %id, "unknown --sort column, leaving rows unsorted"),
        }
    }
    Ok(screen)
}

fn load_config(path: &Path) -> Result<ScreenConfig> {
    ScreenConfig::load(path).with_context(|| format!("load screen {}", path.display()))
}

/// Apply `--layout`, then `--hide` and `--show`.
fn apply_column_flags(prefs: &mut ColumnPreferences, args: &ScreenArgs) -> Result<()> {
    if let Some(path) = &args.layout {
        let layout =
            ColumnLayout::load(path).with_context(|| format!("load layout {}", path.display()))?;
        prefs.apply_layout(&layout);
    }
    apply_column_moves(prefs, args)
}

fn apply_column_moves(prefs: &mut ColumnPreferences, args: &ScreenArgs) -> Result<()> {
    for raw in &args.hide {
        let id = ColumnId::new(raw.as_str()).context("invalid --hide column")?;
        prefs.move_to_hidden(&id).context("--hide")?;
    }
    for raw in &args.show {
        let id = ColumnId::new(raw.as_str()).context("invalid --show column")?;
        prefs.move_to_visible(&id).context("--show")?;
    }
    Ok(())
}

fn resolve_format(flag: Option<FormatArg>, output: Option<&Path>) -> SpreadsheetFormat {
    match flag {
        Some(FormatArg::Csv) => SpreadsheetFormat::Csv,
        Some(FormatArg::Tsv) => SpreadsheetFormat::Tsv,
        None => output
            .and_then(|path| path.extension())
            .and_then(|ext| ext.to_str())
            .and_then(SpreadsheetFormat::from_extension)
            .unwrap_or_default(),
    }
}
