//! redb-based session continuity mirror
//!
//! Selections live in process memory; this mirror keeps a copy on disk so a
//! reload resumes an in-progress order session. One JSON-serialized
//! selection list per user key. The mirror is never the system of record:
//! a missing or corrupt entry loads as an empty list.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::Selection;

use crate::common::error::CoreResult;

/// Table for mirrored selections: key = user_id, value = JSON-serialized Vec<Selection>
const SELECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("selections");

/// Session continuity mirror backed by redb.
#[derive(Clone, Debug)]
pub struct SelectionMirror {
    db: Arc<Database>,
}

impl SelectionMirror {
    /// Open or create the mirror database at the given path.
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SELECTIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// In-memory mirror for tests.
    pub fn open_in_memory() -> CoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SELECTIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Persist the current selection list for a user, replacing any
    /// previous entry.
    pub fn save(&self, user_id: &str, selections: &[Selection]) -> CoreResult<()> {
        let bytes = serde_json::to_vec(selections)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SELECTIONS_TABLE)?;
            table.insert(user_id, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Load the mirrored selections for a user.
    ///
    /// A missing entry is an empty list; a corrupt entry is logged and
    /// treated the same, since the mirror is never authoritative.
    pub fn load(&self, user_id: &str) -> CoreResult<Vec<Selection>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SELECTIONS_TABLE)?;
        let Some(entry) = table.get(user_id)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(entry.value()) {
            Ok(selections) => Ok(selections),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Discarding corrupt selection mirror entry");
                Ok(Vec::new())
            }
        }
    }

    /// Drop the mirrored entry for a user (logout, completed payment).
    pub fn clear(&self, user_id: &str) -> CoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SELECTIONS_TABLE)?;
            table.remove(user_id)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
