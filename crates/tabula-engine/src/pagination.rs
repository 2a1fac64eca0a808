//! Pagination controller.
//!
//! Owns page-index normalization: every call clamps the requested index
//! against the current row count, so a caller never observes a page past
//! the end. Zero rows still form one (empty) page.

use tabula_model::PageState;

/// One page of an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Rows on this page, at most `state.page_size` of them.
    pub visible: &'a [T],
    /// Number of pages, never less than one.
    pub total_pages: usize,
    /// The page state after clamping.
    pub state: PageState,
}

/// `max(1, ceil(len / page_size))`.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp `state.page_index` into `[0, total_pages - 1]`.
pub fn clamp(state: PageState, len: usize) -> PageState {
    let last = total_pages(len, state.size()) - 1;
    state.at(state.page_index.min(last))
}

/// Slice `items` to the page requested by `state`, clamping the index first.
pub fn paginate<T>(items: &[T], state: PageState) -> Page<'_, T> {
    let state = clamp(state, items.len());
    let start = (state.page_index * state.size()).min(items.len());
    let end = (start + state.size()).min(items.len());
    Page {
        visible: &items[start..end],
        total_pages: total_pages(items.len(), state.size()),
        state,
    }
}

/// Human-readable row range for a page, e.g. `"6-10 of 12"`.
///
/// Empty sequences render as `"0-0 of 0"`.
pub fn range_label(len: usize, state: PageState) -> String {
    let state = clamp(state, len);
    if len == 0 {
        return "0-0 of 0".to_string();
    }
    let start = state.page_index * state.size() + 1;
    let end = ((state.page_index + 1) * state.size()).min(len);
    format!("{start}-{end} of {len}")
}
