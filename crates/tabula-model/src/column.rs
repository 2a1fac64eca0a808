use serde::{Deserialize, Serialize};

use crate::ids::ColumnId;

/// A displayable column of a list screen.
///
/// `field` names the record field the column shows. It defaults to the
/// column id when omitted in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub label: String,
    #[serde(default)]
    pub field: Option<String>,
    /// Whether the column is visible by default.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl ColumnDef {
    pub fn new(id: ColumnId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            field: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Record field shown by this column.
    pub fn field_name(&self) -> &str {
        self.field.as_deref().unwrap_or(self.id.as_str())
    }
}
