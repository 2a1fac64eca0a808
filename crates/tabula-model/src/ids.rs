use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::value::Value;

/// Stable identifier of a record within its store.
///
/// Identifiers are compared by their canonical string form, so a numeric
/// identifier `2` and the text `"2"` refer to the same record. Text is kept
/// verbatim: `" A"` and `"A"` are different records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Rejects empty and whitespace-only text.
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::InvalidRecordId(value));
        }
        Ok(Self(value))
    }

    /// Derive an identifier from a field value.
    ///
    /// Returns `None` for missing values, lists, and blank text.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::List(_) => None,
            other => Self::new(other.to_display_string()).ok(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidColumnId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
