use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::RecordId;
use crate::value::Value;

/// One row of a record store: field name to value.
///
/// Records are immutable from the engine's point of view. Field order is not
/// significant; display order comes from the screen's column definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over `(field, value)` pairs in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Identifier stored under `field`, if present and usable.
    pub fn id(&self, field: &str) -> Option<RecordId> {
        self.get(field).and_then(RecordId::from_value)
    }

    /// Canonical string form of a field; missing fields render empty.
    pub fn display(&self, field: &str) -> String {
        self.get(field)
            .map(Value::to_display_string)
            .unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let record = Record::new()
            .with("id", 4)
            .with("client", "Acme")
            .with("tags", vec!["vip", "north"]);
        assert_eq!(record.len(), 3);
        assert_eq!(record.id("id"), Some(RecordId::from(4)));
        assert_eq!(record.display("tags"), "vip, north");
        assert_eq!(record.display("missing"), "");
        assert!(!record.has_field("missing"));
    }

    #[test]
    fn deserializes_from_json_object() {
        let record: Record =
            serde_json::from_str(r#"{"id": 1, "status": "Scheduled", "rate": 2.5}"#).unwrap();
        assert_eq!(record.get("status"), Some(&Value::from("Scheduled")));
        assert_eq!(record.get("rate"), Some(&Value::Float(2.5)));
    }
}
