//! List screen state bundle.
//!
//! A [`ListScreen`] owns one screen's record store and its query, sort,
//! page, selection, and column state. Every user input is one method call
//! that changes one piece of state. Rendering recomputes
//! query -> sort -> paginate from scratch, so repeated calls with the same
//! state give the same snapshot.

use serde::Serialize;
use tabula_model::{
    CheckState, ColumnDef, ColumnFilter, ColumnId, ExportColumns, ExportScope, PageState,
    QueryState, Record, RecordId, SortState,
};
use tracing::{debug, info};

use crate::columns::ColumnPreferences;
use crate::config::ScreenConfig;
use crate::error::{EngineError, ScreenError};
use crate::export::{ExportAdapter, ExportTable};
use crate::pagination::{self, Page};
use crate::query::{SearchScope, filter_records_in};
use crate::selection::{BatchAction, SelectionManager};
use crate::sort::sort_records;
use crate::store::RecordStore;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: RecordId,
    /// Cell text in visible column order.
    pub cells: Vec<String>,
    pub selected: bool,
}

/// Everything a renderer needs for one frame, with no further logic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<RowView>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Rows passing the current query.
    pub filtered_count: usize,
    /// Rows in the store.
    pub total_count: usize,
    pub sort: SortState,
    pub header_state: CheckState,
    pub selection_len: usize,
    pub range_label: String,
}

impl ViewSnapshot {
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|row| row.id.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ListScreen {
    config: ScreenConfig,
    store: RecordStore,
    query: QueryState,
    sort: SortState,
    page: PageState,
    selection: SelectionManager,
    columns: ColumnPreferences,
}

impl ListScreen {
    /// Mount a screen over `records` with the configuration's defaults.
    pub fn new(config: ScreenConfig, records: Vec<Record>) -> Result<Self, ScreenError> {
        config.validate()?;
        let page = config.page_state()?;
        let store = RecordStore::new(config.identifier.clone(), records)?;
        let columns = ColumnPreferences::from_defs(&config.columns);
        debug!(
            screen = %config.name,
            records = store.len(),
            page_size = page.size(),
            "list screen mounted"
        );
        Ok(Self {
            sort: config.default_sort.clone(),
            config,
            store,
            query: QueryState::default(),
            page,
            selection: SelectionManager::new(),
            columns,
        })
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn columns(&self) -> &ColumnPreferences {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnPreferences {
        &mut self.columns
    }

    // =========================================================================
    // Record store
    // =========================================================================

    /// Swap in a new record sequence. Selection is revalidated on next read.
    pub fn replace_records(&mut self, records: Vec<Record>) -> Result<(), EngineError> {
        self.store.replace(records)
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    // =========================================================================
    // Query
    // =========================================================================

    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.query.search_term {
            return;
        }
        debug!(screen = %self.config.name, term = %term, "search changed");
        self.query.search_term = term;
        self.page.page_index = 0;
    }

    pub fn set_column_filter(&mut self, filter: Option<ColumnFilter>) {
        if filter == self.query.column_filter {
            return;
        }
        debug!(screen = %self.config.name, ?filter, "column filter changed");
        self.query.column_filter = filter;
        self.page.page_index = 0;
    }

    pub fn clear_query(&mut self) {
        self.set_search(String::new());
        self.set_column_filter(None);
    }

    // =========================================================================
    // Sort
    // =========================================================================

    /// Column-header click. Returns `false` for undeclared columns.
    pub fn click_header(&mut self, column: &ColumnId) -> bool {
        let Some(def) = self.config.column(column) else {
            debug!(column = %column, "ignoring header click on unknown column");
            return false;
        };
        self.sort = self.sort.cycled(def.field_name());
        debug!(
            screen = %self.config.name,
            key = def.field_name(),
            direction = %self.sort.direction,
            "sort changed"
        );
        true
    }

    pub fn set_sort(&mut self, sort: SortState) {
        debug!(screen = %self.config.name, ?sort, "sort set");
        self.sort = sort;
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Request a page. The index is clamped on the next recompute.
    pub fn go_to_page(&mut self, index: usize) {
        self.page.page_index = index;
        self.reclamp();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.page_index.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page.page_index.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.go_to_page(0);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(usize::MAX);
    }

    /// Change rows per page and return to the first page.
    ///
    /// When the screen declares `page_size_options`, only those sizes are
    /// accepted.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), EngineError> {
        let page = PageState::new(page_size)?;
        if !self.config.offers_page_size(page_size) {
            return Err(EngineError::PageSizeNotOffered {
                page_size,
                options: self.config.page_size_options.clone(),
            });
        }
        self.page = page;
        debug!(screen = %self.config.name, page_size, "page size changed");
        Ok(())
    }

    /// Number of pages for the current query.
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered().len(), self.page.size())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Row-checkbox click. Returns whether the row is selected afterwards.
    pub fn toggle_row(&mut self, id: &RecordId) -> bool {
        self.prune_selection();
        if !self.store.contains(id) {
            debug!(id = %id, "ignoring toggle of unknown record");
            return false;
        }
        self.selection.toggle(id.clone())
    }

    /// Header-checkbox click.
    ///
    /// Deselects the visible rows when all of them are selected, otherwise
    /// selects them. Rows on other pages are untouched.
    pub fn toggle_page(&mut self) -> CheckState {
        let visible = self.visible_ids();
        let checked = self.selection.state_for(&visible) != CheckState::Checked;
        self.selection.select_page(&visible, checked);
        self.selection.state_for(&visible)
    }

    /// Select or deselect exactly the visible rows.
    pub fn select_visible(&mut self, checked: bool) {
        let visible = self.visible_ids();
        self.selection.select_page(&visible, checked);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&mut self, id: &RecordId) -> bool {
        self.prune_selection();
        self.selection.contains(id)
    }

    /// The selection, with ids of removed records already dropped.
    pub fn selection(&mut self) -> &SelectionManager {
        self.prune_selection();
        &self.selection
    }

    pub fn selection_len(&mut self) -> usize {
        self.prune_selection();
        self.selection.len()
    }

    pub fn selected_ids(&mut self) -> Vec<RecordId> {
        self.prune_selection();
        self.selection.ids().cloned().collect()
    }

    /// Tri-state for the current page's header checkbox.
    pub fn header_state(&mut self) -> CheckState {
        let visible = self.visible_ids();
        self.selection.state_for(&visible)
    }

    pub fn can(&mut self, action: BatchAction) -> bool {
        action.is_enabled(self.selection_len())
    }

    /// Hand the selection to a batch action, clearing it.
    ///
    /// Returns `None` without touching the selection when the action's
    /// precondition does not hold.
    pub fn take_selection(&mut self, action: BatchAction) -> Option<Vec<RecordId>> {
        self.prune_selection();
        let taken = self.selection.take_for(action);
        if let Some(ids) = &taken {
            debug!(?action, count = ids.len(), "selection consumed");
        }
        taken
    }

    /// Delete the selected records from the store and clear the selection.
    pub fn delete_selected(&mut self) -> Result<usize, EngineError> {
        let Some(ids) = self.take_selection(BatchAction::Delete) else {
            return Ok(0);
        };
        self.store.remove(&ids)
    }

    // =========================================================================
    // Recompute
    // =========================================================================

    /// Records passing the query, in sort order, across all pages.
    pub fn filtered(&self) -> Vec<&Record> {
        let scope = SearchScope::from_option(self.config.searchable.as_deref());
        let filtered = filter_records_in(self.store.records(), &self.query, scope);
        sort_records(filtered, &self.sort)
    }

    /// Identifiers of the rows on the current page.
    pub fn visible_ids(&mut self) -> Vec<RecordId> {
        self.prune_selection();
        self.reclamp();
        let rows = self.filtered();
        let page = pagination::paginate(&rows, self.page);
        page.visible
            .iter()
            .filter_map(|record| self.store.id_of(record))
            .collect()
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.columns
            .visible()
            .iter()
            .filter_map(|id| self.config.column(id))
            .collect()
    }

    /// Recompute the page and build a rendering snapshot.
    pub fn view(&mut self) -> ViewSnapshot {
        self.prune_selection();
        self.reclamp();
        let rows = self.filtered();
        let Page {
            visible,
            total_pages,
            state,
        } = pagination::paginate(&rows, self.page);
        let columns = self.visible_columns();

        let row_views: Vec<RowView> = visible
            .iter()
            .filter_map(|record| {
                let id = self.store.id_of(record)?;
                Some(RowView {
                    selected: self.selection.contains(&id),
                    cells: columns
                        .iter()
                        .map(|c| record.display(c.field_name()))
                        .collect(),
                    id,
                })
            })
            .collect();
        let visible_ids: Vec<RecordId> = row_views.iter().map(|row| row.id.clone()).collect();

        ViewSnapshot {
            columns: columns.into_iter().cloned().collect(),
            header_state: self.selection.state_for(&visible_ids),
            rows: row_views,
            page_index: state.page_index,
            page_size: state.size(),
            total_pages,
            filtered_count: rows.len(),
            total_count: self.store.len(),
            sort: self.sort.clone(),
            selection_len: self.selection.len(),
            range_label: pagination::range_label(rows.len(), state),
        }
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Materialize the table the screen's export policy calls for.
    pub fn export_table(&self) -> ExportTable {
        let columns: Vec<&ColumnDef> = match self.config.export_columns {
            ExportColumns::Visible => self.visible_columns(),
            ExportColumns::All => self.config.columns.iter().collect(),
        };
        match self.config.export_scope {
            ExportScope::AllRecords => ExportTable::materialize(self.store.records(), &columns),
            ExportScope::FilteredView => ExportTable::materialize(self.filtered(), &columns),
        }
    }

    /// Export through `adapter`. Returns the number of data rows written.
    pub fn export<A: ExportAdapter>(&self, adapter: &mut A) -> Result<usize, A::Error> {
        let table = self.export_table();
        adapter.write_table(&table)?;
        info!(
            screen = %self.config.name,
            scope = %self.config.export_scope,
            rows = table.row_count(),
            columns = table.column_count(),
            "exported list"
        );
        Ok(table.row_count())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn prune_selection(&mut self) {
        self.selection.prune(&self.store);
    }

    /// Pull a stale page index back into range.
    fn reclamp(&mut self) {
        let len = self.filtered().len();
        let clamped = pagination::clamp(self.page, len);
        if clamped != self.page {
            debug!(
                screen = %self.config.name,
                requested = self.page.page_index,
                clamped = clamped.page_index,
                "page index reclamped"
            );
            self.page = clamped;
        }
    }
}
