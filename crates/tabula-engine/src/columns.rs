//! Column preference manager.
//!
//! Columns are partitioned into an ordered visible list and an ordered
//! hidden list. Every declared column is in exactly one of them after every
//! operation; moving a column to the side it is already on does nothing.

use serde::{Deserialize, Serialize};
use tabula_model::{ColumnDef, ColumnId};
use tracing::{debug, warn};

use crate::error::{EngineError, Result};

/// Serializable visible/hidden partition ("save column preferences").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub visible: Vec<ColumnId>,
    #[serde(default)]
    pub hidden: Vec<ColumnId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPreferences {
    declared: Vec<ColumnId>,
    defaults: Vec<ColumnId>,
    visible: Vec<ColumnId>,
    hidden: Vec<ColumnId>,
}

impl ColumnPreferences {
    /// Build preferences over `declared` columns with `default_visible` shown.
    ///
    /// Ids in `default_visible` that are not declared are ignored.
    pub fn new(declared: Vec<ColumnId>, default_visible: &[ColumnId]) -> Self {
        let mut prefs = Self {
            declared,
            defaults: Vec::new(),
            visible: Vec::new(),
            hidden: Vec::new(),
        };
        prefs.defaults = prefs.known_unique(default_visible.iter());
        prefs.reset_to_defaults();
        prefs
    }

    /// Preferences for a screen's column definitions, using each column's
    /// `visible` flag as the default.
    pub fn from_defs(columns: &[ColumnDef]) -> Self {
        let declared = columns.iter().map(|c| c.id.clone()).collect();
        let defaults: Vec<ColumnId> = columns
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.id.clone())
            .collect();
        Self::new(declared, &defaults)
    }

    pub fn visible(&self) -> &[ColumnId] {
        &self.visible
    }

    pub fn hidden(&self) -> &[ColumnId] {
        &self.hidden
    }

    pub fn declared(&self) -> &[ColumnId] {
        &self.declared
    }

    pub fn is_visible(&self, column: &ColumnId) -> bool {
        self.visible.contains(column)
    }

    pub fn move_to_hidden(&mut self, column: &ColumnId) -> Result<()> {
        self.ensure_declared(column)?;
        if let Some(pos) = self.visible.iter().position(|c| c == column) {
            let moved = self.visible.remove(pos);
            self.hidden.push(moved);
            debug!(column = %column, "column hidden");
        }
        Ok(())
    }

    pub fn move_to_visible(&mut self, column: &ColumnId) -> Result<()> {
        self.ensure_declared(column)?;
        if let Some(pos) = self.hidden.iter().position(|c| c == column) {
            let moved = self.hidden.remove(pos);
            self.visible.push(moved);
            debug!(column = %column, "column shown");
        }
        Ok(())
    }

    pub fn move_all_to_hidden(&mut self) {
        self.hidden.append(&mut self.visible);
        debug!("all columns hidden");
    }

    pub fn move_all_to_visible(&mut self) {
        self.visible.append(&mut self.hidden);
        debug!("all columns shown");
    }

    /// Restore a partition with `default_visible` shown in that order and
    /// every other declared column hidden in declaration order.
    pub fn reset(&mut self, default_visible: &[ColumnId]) {
        self.visible = self.known_unique(default_visible.iter());
        self.hidden = self
            .declared
            .iter()
            .filter(|c| !self.visible.contains(c))
            .cloned()
            .collect();
        debug!(visible = self.visible.len(), "column preferences reset");
    }

    /// Restore the partition this manager was created with.
    pub fn reset_to_defaults(&mut self) {
        let defaults = self.defaults.clone();
        self.reset(&defaults);
    }

    /// Move a visible column one place earlier. No-op at the front or when hidden.
    pub fn move_up(&mut self, column: &ColumnId) -> Result<()> {
        self.ensure_declared(column)?;
        if let Some(pos) = self.visible.iter().position(|c| c == column)
            && pos > 0
        {
            self.visible.swap(pos, pos - 1);
        }
        Ok(())
    }

    /// Move a visible column one place later. No-op at the back or when hidden.
    pub fn move_down(&mut self, column: &ColumnId) -> Result<()> {
        self.ensure_declared(column)?;
        if let Some(pos) = self.visible.iter().position(|c| c == column)
            && pos + 1 < self.visible.len()
        {
            self.visible.swap(pos, pos + 1);
        }
        Ok(())
    }

    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout {
            visible: self.visible.clone(),
            hidden: self.hidden.clone(),
        }
    }

    /// Adopt a saved layout.
    ///
    /// Unknown ids are dropped, repeats keep their first position, and
    /// declared columns the layout omits are appended to hidden.
    pub fn apply_layout(&mut self, layout: &ColumnLayout) {
        for column in layout.visible.iter().chain(&layout.hidden) {
            if !self.declared.contains(column) {
                warn!(column = %column, "ignoring unknown column in saved layout");
            }
        }
        let visible = self.known_unique(layout.visible.iter());
        let mut hidden = self.known_unique(layout.hidden.iter().filter(|c| !visible.contains(c)));
        for column in &self.declared {
            if !visible.contains(column) && !hidden.contains(column) {
                hidden.push(column.clone());
            }
        }
        self.visible = visible;
        self.hidden = hidden;
    }

    fn ensure_declared(&self, column: &ColumnId) -> Result<()> {
        if self.declared.contains(column) {
            Ok(())
        } else {
            Err(EngineError::UnknownColumn {
                column: column.clone(),
            })
        }
    }

    fn known_unique<'a>(&self, columns: impl Iterator<Item = &'a ColumnId>) -> Vec<ColumnId> {
        let mut out: Vec<ColumnId> = Vec::new();
        for column in columns {
            if self.declared.contains(column) && !out.contains(column) {
                out.push(column.clone());
            }
        }
        out
    }
}
