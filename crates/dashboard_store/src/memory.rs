use dashboard_core::Record;
use dashboard_logging::dash_debug;
use serde_json::{Map, Value};

use crate::document::record_from_document;
use crate::store::{assign_ids, RecordStore, StoreError};

/// Failure injection for exercising error paths without a broken database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultMode {
    #[default]
    Healthy,
    /// Every call fails before touching data.
    Unreachable,
    /// `replace_all` deletes, then fails before inserting anything.
    InsertFails,
}

/// Process-local collection. Documents go through the same JSON shape as
/// the SQLite store so both behave alike.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Vec<(String, Map<String, Value>)>,
    fault: FaultMode,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: &[Record]) -> Self {
        Self {
            documents: assign_ids(records),
            fault: FaultMode::Healthy,
        }
    }

    pub fn set_fault(&mut self, fault: FaultMode) {
        self.fault = fault;
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        match self.fault {
            FaultMode::Unreachable => Err(StoreError::Unavailable(
                "memory store marked unreachable".to_string(),
            )),
            FaultMode::Healthy | FaultMode::InsertFails => Ok(()),
        }
    }
}

impl RecordStore for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn fetch_all(&mut self) -> Result<Vec<Record>, StoreError> {
        self.check_reachable()?;
        Ok(self
            .documents
            .iter()
            .map(|(id, document)| record_from_document(Some(id.clone()), document))
            .collect())
    }

    fn replace_all(&mut self, records: &[Record]) -> Result<usize, StoreError> {
        self.check_reachable()?;
        let documents = assign_ids(records);
        let deleted = std::mem::take(&mut self.documents).len();
        if self.fault == FaultMode::InsertFails {
            return Err(StoreError::Unavailable(format!(
                "insert failed after deleting {deleted} documents"
            )));
        }
        self.documents = documents;
        dash_debug!("Replaced {} documents with {} in memory", deleted, self.documents.len());
        Ok(self.documents.len())
    }
}
