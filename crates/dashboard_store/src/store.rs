use std::collections::HashSet;
use std::path::PathBuf;

use dashboard_core::Record;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::document::record_to_document;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid collection name {0:?}: use letters, digits and underscores")]
    InvalidCollection(String),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("malformed document {id}: {source}")]
    Document {
        id: String,
        source: serde_json::Error,
    },
    #[error("could not encode document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Where the collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Database file; the "endpoint" of the store.
    pub database: PathBuf,
    pub collection: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database: PathBuf::from("recipes.db"),
            collection: "recipes".to_string(),
        }
    }
}

impl StoreSettings {
    pub fn validated_collection(&self) -> Result<&str, StoreError> {
        validate_collection(&self.collection)
    }
}

/// Collection names end up in SQL, so only identifier characters pass.
pub(crate) fn validate_collection(name: &str) -> Result<&str, StoreError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}

/// A single collection of recipe documents.
///
/// `replace_all` is delete-everything-then-insert-everything. Implementations
/// are not required to make it atomic: a failure after the delete may leave
/// the collection empty, and callers must report that as a failed save.
pub trait RecordStore {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Every document in store-native order, identifiers stringified.
    fn fetch_all(&mut self) -> Result<Vec<Record>, StoreError>;

    /// Replace the collection with `records`; returns how many were inserted.
    fn replace_all(&mut self, records: &[Record]) -> Result<usize, StoreError>;
}

/// Pair each record with the identifier it will be stored under. Existing
/// identifiers survive unless blank or repeated within the batch; the rest
/// get a fresh UUID.
pub(crate) fn assign_ids(records: &[Record]) -> Vec<(String, Map<String, Value>)> {
    let mut used = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|record| {
            let id = match record.id.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() && !used.contains(id) => id.to_string(),
                _ => uuid::Uuid::new_v4().to_string(),
            };
            used.insert(id.clone());
            (id, record_to_document(record))
        })
        .collect()
}
