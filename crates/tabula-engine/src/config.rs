//! Screen configuration.
//!
//! Each list screen declares its identifier field, columns, defaults, and
//! export policy in a TOML document:
//!
//! ```toml
//! name = "activities"
//! identifier = "id"
//! page_size = 5
//! export_scope = "filtered"
//! searchable = ["client", "status", "notes"]
//!
//! [default_sort]
//! key = "client"
//! direction = "asc"
//!
//! [[columns]]
//! id = "client"
//! label = "Client"
//!
//! [[columns]]
//! id = "notes"
//! label = "Notes"
//! visible = false
//! ```
//!
//! Saved column layouts are stored separately as JSON.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tabula_model::{
    ColumnDef, ColumnId, DEFAULT_PAGE_SIZE, ExportColumns, ExportScope, PageState, SortState,
};

use crate::columns::ColumnLayout;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Screen name, used in logs and export file names.
    pub name: String,
    /// Field holding each record's unique identifier.
    pub identifier: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Choices offered by a rows-per-page selector.
    #[serde(default)]
    pub page_size_options: Vec<usize>,
    /// Which rows "Export" writes. Required.
    pub export_scope: ExportScope,
    #[serde(default)]
    pub export_columns: ExportColumns,
    /// Fields consulted by free-text search; every field when absent.
    #[serde(default)]
    pub searchable: Option<Vec<String>>,
    #[serde(default)]
    pub default_sort: SortState,
    pub columns: Vec<ColumnDef>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl ScreenConfig {
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        export_scope: ExportScope,
        columns: Vec<ColumnDef>,
    ) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: Vec::new(),
            export_scope,
            export_columns: ExportColumns::default(),
            searchable: None,
            default_sort: SortState::default(),
            columns,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    #[must_use]
    pub fn with_default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = sort;
        self
    }

    #[must_use]
    pub fn with_searchable(mut self, fields: Vec<String>) -> Self {
        self.searchable = Some(fields);
        self
    }

    #[must_use]
    pub fn with_export_columns(mut self, columns: ExportColumns) -> Self {
        self.export_columns = columns;
        self
    }

    /// Parse and validate a TOML screen definition.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML screen definition from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check the invariants a screen relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            screen: self.name.clone(),
            reason,
        };
        if self.identifier.trim().is_empty() {
            return Err(invalid("identifier field is blank".to_string()));
        }
        if self.page_size == 0 {
            return Err(invalid("page_size must be greater than zero".to_string()));
        }
        if self.page_size_options.contains(&0) {
            return Err(invalid("page_size_options must be positive".to_string()));
        }
        if !self.offers_page_size(self.page_size) {
            return Err(invalid(format!(
                "page_size {} is not one of page_size_options {:?}",
                self.page_size, self.page_size_options
            )));
        }
        if self.columns.is_empty() {
            return Err(invalid("at least one column is required".to_string()));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.id.as_str().trim().is_empty() {
                return Err(invalid("column id is blank".to_string()));
            }
            if !seen.insert(&column.id) {
                return Err(invalid(format!("duplicate column id '{}'", column.id)));
            }
        }
        if let Some(key) = self.default_sort.key.as_deref()
            && key != self.identifier
            && !self.columns.iter().any(|c| c.field_name() == key)
        {
            return Err(invalid(format!("default sort key '{key}' is not a column field")));
        }
        Ok(())
    }

    pub fn page_state(&self) -> Result<PageState, ConfigError> {
        PageState::new(self.page_size).map_err(|err| ConfigError::Invalid {
            screen: self.name.clone(),
            reason: err.to_string(),
        })
    }

    pub fn column(&self, id: &ColumnId) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Whether a rows-per-page choice is allowed. Any positive size is when
    /// no options are declared.
    pub fn offers_page_size(&self, page_size: usize) -> bool {
        page_size > 0
            && (self.page_size_options.is_empty() || self.page_size_options.contains(&page_size))
    }
}

impl ColumnLayout {
    /// Read a saved layout from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|err| ConfigError::Parse {
            message: format!("{}: {err}", path.display()),
        })
    }

    /// Write this layout as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(|err| ConfigError::Encode {
            message: err.to_string(),
        })?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_model::SortDirection;

    const ACTIVITIES: &str = r#"
name = "activities"
identifier = "id"
page_size = 5
page_size_options = [5, 10, 25]
export_scope = "filtered"
searchable = ["client", "status"]

[default_sort]
key = "client"
direction = "desc"

[[columns]]
id = "client"
label = "Client"

[[columns]]
id = "status"
label = "Status"

[[columns]]
id = "due"
label = "Due Date"
field = "due_date"
visible = false
"#;

    #[test]
    fn parses_full_screen() {
        let config = ScreenConfig::from_toml_str(ACTIVITIES).unwrap();
        assert_eq!(config.name, "activities");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.export_scope, ExportScope::FilteredView);
        assert_eq!(config.export_columns, ExportColumns::Visible);
        assert_eq!(
            config.default_sort,
            SortState::by("client", SortDirection::Desc)
        );
        assert_eq!(config.columns[2].field_name(), "due_date");
        assert!(!config.columns[2].visible);
        assert_eq!(config.page_size_options, [5, 10, 25]);
    }

    #[test]
    fn page_size_must_be_an_offered_option() {
        let content = ACTIVITIES.replace("page_size = 5\n", "page_size = 7\n");
        let err = ScreenConfig::from_toml_str(&content).unwrap_err();
        assert!(err.to_string().contains("page_size_options"));

        let config = ScreenConfig::from_toml_str(ACTIVITIES).unwrap();
        assert!(config.offers_page_size(25));
        assert!(!config.offers_page_size(7));

        let open = ScreenConfig::new("open", "id", ExportScope::AllRecords, config.columns);
        assert!(open.offers_page_size(7));
        assert!(!open.offers_page_size(0));
    }

    #[test]
    fn export_scope_is_required() {
        let content = ACTIVITIES.replace("export_scope = \"filtered\"\n", "");
        let err = ScreenConfig::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_zero_page_size() {
        let content = ACTIVITIES.replace("page_size = 5", "page_size = 0");
        let err = ScreenConfig::from_toml_str(&content).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let content = ACTIVITIES.replace("id = \"due\"", "id = \"client\"");
        let err = ScreenConfig::from_toml_str(&content).unwrap_err();
        assert!(err.to_string().contains("duplicate column id 'client'"));
    }

    #[test]
    fn rejects_unknown_default_sort_key() {
        let content = ACTIVITIES.replace("key = \"client\"", "key = \"region\"");
        let err = ScreenConfig::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.toml");
        std::fs::write(&path, ACTIVITIES).unwrap();
        let config = ScreenConfig::load(&path).unwrap();
        assert_eq!(config.columns.len(), 3);

        let missing = ScreenConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }

    #[test]
    fn layout_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let layout = ColumnLayout {
            visible: vec![ColumnId::new("status").unwrap()],
            hidden: vec![ColumnId::new("client").unwrap()],
        };
        layout.save(&path).unwrap();
        assert_eq!(ColumnLayout::load(&path).unwrap(), layout);
    }
}
