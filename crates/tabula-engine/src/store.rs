//! Record store owned by a list screen.
//!
//! The store is copy-on-write: every mutation builds a new sequence and
//! swaps it in whole, bumping [`RecordStore::revision`]. Consumers that cache
//! anything keyed by identifier (the selection) compare revisions to know
//! when to revalidate.

use std::collections::HashMap;

use tabula_model::{Record, RecordId};
use tracing::debug;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone)]
pub struct RecordStore {
    identifier: String,
    records: Vec<Record>,
    index: HashMap<RecordId, usize>,
    revision: u64,
}

impl RecordStore {
    /// Build a store, validating that every record has a unique identifier.
    pub fn new(identifier: impl Into<String>, records: Vec<Record>) -> Result<Self> {
        let identifier = identifier.into();
        let index = build_index(&identifier, &records)?;
        Ok(Self {
            identifier,
            records,
            index,
            revision: 0,
        })
    }

    /// Name of the identifier field.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Incremented on every successful replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Identifier of a record held by this store.
    pub fn id_of(&self, record: &Record) -> Option<RecordId> {
        record.id(&self.identifier)
    }

    /// Union of field names across all records, in first-seen order.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in &self.records {
            for (field, _) in record.fields() {
                if !names.iter().any(|n| n == field) {
                    names.push(field.to_string());
                }
            }
        }
        names
    }

    /// Swap in a new sequence of records.
    ///
    /// On error the store is left unchanged.
    pub fn replace(&mut self, records: Vec<Record>) -> Result<()> {
        let index = build_index(&self.identifier, &records)?;
        self.records = records;
        self.index = index;
        self.revision += 1;
        debug!(
            records = self.records.len(),
            revision = self.revision,
            "record store replaced"
        );
        Ok(())
    }

    /// Append a record.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        let mut records = self.records.clone();
        records.push(record);
        self.replace(records)
    }

    /// Replace the record sharing `record`'s identifier, keeping its position.
    pub fn update(&mut self, record: Record) -> Result<()> {
        let id = record
            .id(&self.identifier)
            .ok_or_else(|| EngineError::MissingIdentifier {
                index: 0,
                field: self.identifier.clone(),
            })?;
        let position = *self
            .index
            .get(&id)
            .ok_or(EngineError::RecordNotFound { id })?;
        let mut records = self.records.clone();
        records[position] = record;
        self.replace(records)
    }

    /// Drop every record whose identifier is in `ids`. Returns how many were removed.
    pub fn remove(&mut self, ids: &[RecordId]) -> Result<usize> {
        let before = self.records.len();
        let records: Vec<Record> = self
            .records
            .iter()
            .filter(|record| {
                record
                    .id(&self.identifier)
                    .is_none_or(|id| !ids.contains(&id))
            })
            .cloned()
            .collect();
        let removed = before - records.len();
        self.replace(records)?;
        Ok(removed)
    }
}

fn build_index(identifier: &str, records: &[Record]) -> Result<HashMap<RecordId, usize>> {
    let mut index = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let id = record
            .id(identifier)
            .ok_or_else(|| EngineError::MissingIdentifier {
                index: position,
                field: identifier.to_string(),
            })?;
        if index.insert(id.clone(), position).is_some() {
            return Err(EngineError::DuplicateIdentifier { id });
        }
    }
    Ok(index)
}
