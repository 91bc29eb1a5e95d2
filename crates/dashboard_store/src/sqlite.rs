use dashboard_core::Record;
use dashboard_logging::{dash_debug, dash_info};
use rusqlite::{params, Connection};
use serde_json::{Map, Value};

use crate::document::record_from_document;
use crate::store::{assign_ids, validate_collection, RecordStore, StoreError, StoreSettings};

/// SQLite-backed collection: one table, one JSON document per row.
pub struct SqliteStore {
    conn: Connection,
    table: String,
    location: String,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the collection
    /// table exists.
    pub fn open(settings: &StoreSettings) -> Result<Self, StoreError> {
        let table = settings.validated_collection()?.to_string();
        if let Some(parent) = settings.database.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(StoreError::Unavailable(format!(
                    "database directory {} does not exist",
                    parent.display()
                )));
            }
        }
        let conn = Connection::open(&settings.database)?;
        let location = format!("{}#{}", settings.database.display(), table);
        Self::with_connection(conn, table, location)
    }

    pub fn open_in_memory(collection: &str) -> Result<Self, StoreError> {
        let table = validate_collection(collection)?.to_string();
        let location = format!(":memory:#{table}");
        Self::with_connection(Connection::open_in_memory()?, table, location)
    }

    fn with_connection(conn: Connection, table: String, location: String) -> Result<Self, StoreError> {
        let store = Self {
            conn,
            table,
            location,
        };
        store.init_schema()?;
        dash_info!("Opened collection {}", store.location);
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS \"{}\" (
                    id      TEXT PRIMARY KEY NOT NULL,
                    body    TEXT NOT NULL
                )",
                self.table
            ),
            [],
        )?;
        Ok(())
    }
}

impl RecordStore for SqliteStore {
    fn describe(&self) -> String {
        self.location.clone()
    }

    fn fetch_all(&mut self) -> Result<Vec<Record>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT id, body FROM \"{}\" ORDER BY rowid", self.table))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, body) = row?;
            let document: Map<String, Value> = serde_json::from_str(&body)
                .map_err(|source| StoreError::Document {
                    id: id.clone(),
                    source,
                })?;
            records.push(record_from_document(Some(id), &document));
        }
        dash_debug!("Fetched {} documents from {}", records.len(), self.location);
        Ok(records)
    }

    fn replace_all(&mut self, records: &[Record]) -> Result<usize, StoreError> {
        let documents = assign_ids(records);
        let tx = self.conn.transaction()?;
        let deleted = tx.execute(&format!("DELETE FROM \"{}\"", self.table), [])?;
        {
            let mut insert = tx.prepare(&format!(
                "INSERT INTO \"{}\" (id, body) VALUES (?1, ?2)",
                self.table
            ))?;
            for (id, document) in &documents {
                insert.execute(params![id, serde_json::to_string(document)?])?;
            }
        }
        tx.commit()?;
        dash_debug!(
            "Replaced {} documents with {} in {}",
            deleted,
            documents.len(),
            self.location
        );
        Ok(documents.len())
    }
}
