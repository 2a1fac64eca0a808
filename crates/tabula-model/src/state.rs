//! Per-screen list state: query, sort, page, and checkbox state.
//!
//! These are plain values. The engine decides how they combine; this module
//! only owns their invariants (positive page size, valid directions).

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::value::Value;

// =============================================================================
// QUERY
// =============================================================================

/// Exact-match filter on one field ("select a query" dropdown).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub field: String,
    pub value: Value,
}

impl ColumnFilter {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Free-text search plus an optional column filter.
///
/// An empty search term and no column filter pass every record through.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryState {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub column_filter: Option<ColumnFilter>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: ColumnFilter) -> Self {
        self.column_filter = Some(filter);
        self
    }

    /// Whether this query leaves its input untouched.
    pub fn is_identity(&self) -> bool {
        self.search_term.is_empty() && self.column_filter.is_none()
    }
}

// =============================================================================
// SORT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ModelError::InvalidValue {
                field: "direction",
                value: s.to_string(),
            }),
        }
    }
}

/// Single-column sort. No key preserves store order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Header-click transition.
    ///
    /// Clicking the active key flips the direction (`asc -> desc -> asc`);
    /// clicking any other key switches to it in ascending order.
    #[must_use]
    pub fn cycled(&self, key: &str) -> Self {
        match &self.key {
            Some(current) if current == key => Self::by(key, self.direction.toggled()),
            _ => Self::by(key, SortDirection::Asc),
        }
    }

    pub fn is_sorted_by(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// Default rows per page for screens that do not declare one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page size and zero-based page index.
///
/// The page index is only a request; the pagination controller clamps it
/// against the current row count on every recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub page_size: NonZeroUsize,
    #[serde(default)]
    pub page_index: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Result<Self, ModelError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(ModelError::ZeroPageSize)?;
        Ok(Self {
            page_size,
            page_index: 0,
        })
    }

    #[must_use]
    pub fn at(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }

    pub fn size(&self) -> usize {
        self.page_size.get()
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            page_index: 0,
        }
    }
}

// =============================================================================
// CHECKBOX
// =============================================================================

/// Tri-state of a page-level "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    /// No visible row is selected ("none").
    Unchecked,
    /// Some but not all visible rows are selected ("some").
    Indeterminate,
    /// Every visible row is selected and the page is non-empty ("all").
    Checked,
}

impl CheckState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unchecked => "none",
            Self::Indeterminate => "some",
            Self::Checked => "all",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_identity() {
        assert!(QueryState::new().is_identity());
        assert!(!QueryState::new().with_search("a").is_identity());
        assert!(
            !QueryState::new()
                .with_filter(ColumnFilter::new("status", "Scheduled"))
                .is_identity()
        );
    }

    #[test]
    fn header_click_cycles_direction() {
        let sort = SortState::unsorted().cycled("client");
        assert_eq!(sort, SortState::by("client", SortDirection::Asc));
        let sort = sort.cycled("client");
        assert_eq!(sort, SortState::by("client", SortDirection::Desc));
        let sort = sort.cycled("client");
        assert_eq!(sort, SortState::by("client", SortDirection::Asc));
    }

    #[test]
    fn switching_key_resets_to_ascending() {
        let sort = SortState::by("client", SortDirection::Desc).cycled("status");
        assert_eq!(sort, SortState::by("status", SortDirection::Asc));
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn page_state_rejects_zero_size() {
        assert_eq!(PageState::new(0), Err(ModelError::ZeroPageSize));
        let page = PageState::new(5).unwrap().at(2);
        assert_eq!((page.size(), page.page_index), (5, 2));
    }

    #[test]
    fn page_state_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<PageState>(r#"{"page_size": 0}"#).is_err());
        let page: PageState = serde_json::from_str(r#"{"page_size": 25}"#).unwrap();
        assert_eq!(page.page_index, 0);
    }
}
