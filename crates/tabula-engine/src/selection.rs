//! Selection manager.
//!
//! Selection is a set of record identifiers, never row positions, so it
//! survives re-sorting, re-filtering, and paging. It is cumulative across
//! pages until cleared.
//!
//! Identifiers of records that have left the store are pruned lazily: the
//! manager remembers the store revision it last validated against and
//! re-validates on the next read after the store changes.

use std::collections::BTreeSet;

use tabula_model::{CheckState, RecordId};
use tracing::debug;

use crate::store::RecordStore;

/// Actions that consume the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchAction {
    /// Needs at least one selected record.
    Delete,
    /// Needs exactly one selected record.
    Modify,
}

impl BatchAction {
    /// Whether the action may be invoked with `selected` records selected.
    pub fn is_enabled(self, selected: usize) -> bool {
        match self {
            Self::Delete => selected > 0,
            Self::Modify => selected == 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: BTreeSet<RecordId>,
    synced_revision: Option<u64>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one record. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Add (`checked`) or remove exactly the given ids, leaving others alone.
    pub fn select_page<'a, I>(&mut self, ids: I, checked: bool)
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        for id in ids {
            if checked {
                self.selected.insert(id.clone());
            } else {
                self.selected.remove(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Header-checkbox state for the currently visible ids.
    pub fn state_for(&self, visible: &[RecordId]) -> CheckState {
        let selected = visible
            .iter()
            .filter(|id| self.selected.contains(*id))
            .count();
        match selected {
            0 => CheckState::Unchecked,
            n if n == visible.len() => CheckState::Checked,
            _ => CheckState::Indeterminate,
        }
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in identifier order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.selected.iter()
    }

    /// Drop ids the store no longer holds, if the store changed since the
    /// last prune. Returns how many ids were dropped.
    pub fn prune(&mut self, store: &RecordStore) -> usize {
        if self.synced_revision == Some(store.revision()) {
            return 0;
        }
        let before = self.selected.len();
        self.selected.retain(|id| store.contains(id));
        self.synced_revision = Some(store.revision());
        let dropped = before - self.selected.len();
        if dropped > 0 {
            debug!(
                dropped,
                revision = store.revision(),
                "pruned stale selection"
            );
        }
        dropped
    }

    /// Take the selection for `action` if its precondition holds, clearing it.
    ///
    /// Returns `None` and keeps the selection when the action is disabled.
    pub fn take_for(&mut self, action: BatchAction) -> Option<Vec<RecordId>> {
        if !action.is_enabled(self.selected.len()) {
            return None;
        }
        let ids = std::mem::take(&mut self.selected).into_iter().collect();
        Some(ids)
    }
}
