//! Dashboard store: the document collection behind the grid.
mod document;
mod memory;
mod sqlite;
mod store;

pub use document::{record_from_document, record_to_document};
pub use memory::{FaultMode, MemoryStore};
pub use sqlite::SqliteStore;
pub use store::{RecordStore, StoreError, StoreSettings};
