//! Sort stage: stable single-key ordering.
//!
//! Values compare by kind:
//!
//! - text against text: case-insensitive
//! - number against number: numeric
//! - anything else: canonical strings in natural (byte) order
//!
//! Missing values (absent field or `Null`) sort lowest in ascending order.
//! Descending order is the exact reverse of ascending, ties included.
//!
//! The mixed-kind fallback is not transitive when a column holds both text
//! and numbers, so ordering uses a merge sort that tolerates inconsistent
//! comparisons instead of `slice::sort_by`, which may panic on them.

use std::cmp::Ordering;

use tabula_model::{Record, SortDirection, SortState, Value};

/// Order `records` by `sort`.
///
/// Returns the input unchanged when the sort has no key or no record
/// carries the key field.
pub fn sort_records<'a>(records: Vec<&'a Record>, sort: &SortState) -> Vec<&'a Record> {
    let Some(key) = sort.key.as_deref() else {
        return records;
    };
    if !records.iter().any(|record| record.has_field(key)) {
        return records;
    }
    let mut sorted = merge_sort(records, &|a: &&Record, b: &&Record| {
        compare_values(a.get(key), b.get(key))
    });
    if sort.direction == SortDirection::Desc {
        sorted.reverse();
    }
    sorted
}

/// Ascending comparison of two optional field values.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_missing());
    let b = b.filter(|v| !v.is_missing());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Text(a), Value::Text(b)) => compare_text(a, b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => a.to_display_string().cmp(&b.to_display_string()),
        },
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Stable top-down merge sort.
fn merge_sort<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare);
    let right = merge_sort(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}
