//! Terminal rendering for list screens.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tabula_engine::{ColumnPreferences, ScreenConfig, ViewSnapshot};
use tabula_model::{CheckState, SortDirection};

/// Build the page table: a selection column followed by the visible columns.
pub fn view_table(view: &ViewSnapshot) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell(check_mark(view.header_state))];
    for column in &view.columns {
        let label = if view.sort.is_sorted_by(column.field_name()) {
            format!("{} {}", column.label, sort_arrow(view.sort.direction))
        } else {
            column.label.clone()
        };
        header.push(header_cell(&label));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);

    for row in &view.rows {
        let mut cells = Vec::with_capacity(row.cells.len() + 1);
        cells.push(if row.selected {
            Cell::new("[x]").fg(Color::Green)
        } else {
            dim_cell("[ ]")
        });
        for value in &row.cells {
            cells.push(if value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            });
        }
        if row.selected {
            cells = cells
                .into_iter()
                .map(|cell| cell.add_attribute(Attribute::Bold))
                .collect();
        }
        table.add_row(cells);
    }
    table
}

/// One-line summary under the table.
pub fn footer(view: &ViewSnapshot) -> String {
    let mut line = format!(
        "Page {} of {} | {}",
        view.page_index + 1,
        view.total_pages,
        view.range_label
    );
    if view.filtered_count != view.total_count {
        line.push_str(&format!(" (filtered from {})", view.total_count));
    }
    if view.selection_len > 0 {
        line.push_str(&format!(" | {} selected", view.selection_len));
    }
    line
}

/// Column partition as a table: position, id, label, and side.
pub fn columns_table(config: &ScreenConfig, prefs: &ColumnPreferences) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Label"),
        header_cell("Shown"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    for (position, id) in prefs.visible().iter().enumerate() {
        let label = config.column(id).map_or("", |c| c.label.as_str());
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(label),
            Cell::new("✓").fg(Color::Green),
        ]);
    }
    for id in prefs.hidden() {
        let label = config.column(id).map_or("", |c| c.label.as_str());
        table.add_row(vec![
            dim_cell("-"),
            Cell::new(id).fg(Color::DarkGrey),
            Cell::new(label).fg(Color::DarkGrey),
            dim_cell("-"),
        ]);
    }
    table
}

pub fn check_mark(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Indeterminate => "[-]",
        CheckState::Checked => "[x]",
    }
}

fn sort_arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_engine::ListScreen;
    use tabula_model::{ColumnDef, ColumnId, ExportScope, Record, RecordId, SortState};

    fn screen() -> ListScreen {
        let columns = vec![
            ColumnDef::new(ColumnId::new("client").unwrap(), "Client"),
            ColumnDef::new(ColumnId::new("status").unwrap(), "Status"),
        ];
        let config = ScreenConfig::new("activities", "id", ExportScope::FilteredView, columns)
            .with_page_size(2);
        let records = vec![
            Record::new().with("id", 1).with("client", "Acme").with("status", "Open"),
            Record::new().with("id", 2).with("client", "Globex"),
            Record::new().with("id", 3).with("client", "Initech").with("status", "Done"),
        ];
        ListScreen::new(config, records).unwrap()
    }

    #[test]
    fn footer_reports_page_filter_and_selection() {
        let mut screen = screen();
        assert_eq!(footer(&screen.view()), "Page 1 of 2 | 1-2 of 3");

        screen.toggle_row(&RecordId::from(1));
        screen.set_search("n");
        insta::assert_snapshot!(footer(&screen.view()), @"Page 1 of 1 | 1-2 of 2 (filtered from 3) | 1 selected");
    }

    #[test]
    fn table_marks_selection_and_sort() {
        let mut screen = screen();
        screen.toggle_row(&RecordId::from(2));
        screen.set_sort(SortState::by("client", SortDirection::Desc));
        let rendered = view_table(&screen.view()).to_string();
        assert!(rendered.contains("Client ▼"));
        assert!(rendered.contains("[x]"));
        assert!(rendered.contains("[-]"));
    }
}
