//! Query stage: free-text search and exact column filter.
//!
//! Filtering keeps input order and only removes records. A column filter on
//! a field the records do not have matches nothing.

use tabula_model::{QueryState, Record, Value};

/// Fields consulted by free-text search.
#[derive(Debug, Clone, Copy, Default)]
pub enum SearchScope<'a> {
    /// Every field of the record.
    #[default]
    AllFields,
    /// Only the named fields.
    Fields(&'a [String]),
}

impl<'a> SearchScope<'a> {
    pub fn from_option(fields: Option<&'a [String]>) -> Self {
        fields.map_or(Self::AllFields, Self::Fields)
    }
}

/// Apply `query` to `records`, searching every field.
pub fn filter_records<'a, I>(records: I, query: &QueryState) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    filter_records_in(records, query, SearchScope::AllFields)
}

/// Apply `query` to `records`, searching only the fields in `scope`.
pub fn filter_records_in<'a, I>(
    records: I,
    query: &QueryState,
    scope: SearchScope<'_>,
) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    if query.is_identity() {
        return records.into_iter().collect();
    }
    let needle = query.search_term.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_filter(record, query) && matches_search(record, &needle, scope))
        .collect()
}

fn matches_filter(record: &Record, query: &QueryState) -> bool {
    let Some(filter) = &query.column_filter else {
        return true;
    };
    record
        .get(&filter.field)
        .is_some_and(|value| value.exact_eq(&filter.value))
}

/// `needle` must already be case-folded.
fn matches_search(record: &Record, needle: &str, scope: SearchScope<'_>) -> bool {
    if needle.is_empty() {
        return true;
    }
    match scope {
        SearchScope::AllFields => record
            .fields()
            .any(|(_, value)| contains_folded(value, needle)),
        SearchScope::Fields(fields) => fields
            .iter()
            .filter_map(|field| record.get(field))
            .any(|value| contains_folded(value, needle)),
    }
}

fn contains_folded(value: &Value, needle: &str) -> bool {
    value.to_display_string().to_lowercase().contains(needle)
}
