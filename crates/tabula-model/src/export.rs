//! Export policy declared by each list screen.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Which rows an export contains.
///
/// Has no default. Every screen configuration must name one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportScope {
    /// The whole record store, in store order, ignoring search and filter.
    #[serde(rename = "all")]
    AllRecords,
    /// The currently filtered and sorted rows, across every page.
    #[serde(rename = "filtered")]
    FilteredView,
}

impl ExportScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllRecords => "all",
            Self::FilteredView => "filtered",
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportScope {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::AllRecords),
            "filtered" => Ok(Self::FilteredView),
            _ => Err(ModelError::InvalidValue {
                field: "export scope",
                value: s.to_string(),
            }),
        }
    }
}

/// Which columns an export contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportColumns {
    /// Visible columns in their current display order.
    #[default]
    Visible,
    /// Every declared column in declaration order.
    All,
}
