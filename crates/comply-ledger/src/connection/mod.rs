//! Connection management: one serialized writer, pooled readers.

pub mod pool;
pub mod pragmas;
pub mod writer;

use std::path::Path;
use std::sync::Mutex;

use comply_core::errors::StorageError;
use rusqlite::Connection;

use self::pool::ReadPool;
use self::pragmas::apply_pragmas;
use crate::{migrations, queries, to_storage_err};

const READ_POOL_SIZE: usize = 2;

/// Owns the ledger's connections. Schema is migrated and the event
/// registry seeded on open.
pub struct LedgerDatabase {
    writer: Mutex<Connection>,
    /// `None` for in-memory databases; reads then go through the writer.
    readers: Option<ReadPool>,
}

impl LedgerDatabase {
    pub fn open(path: &Path, busy_timeout_ms: u64) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(to_storage_err)?;
        apply_pragmas(&writer, busy_timeout_ms)?;
        Self::prepare(&writer)?;

        let readers = ReadPool::open(path, READ_POOL_SIZE, busy_timeout_ms)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
        })
    }

    /// In-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(to_storage_err)?;
        apply_pragmas(&writer, 0)?;
        Self::prepare(&writer)?;
        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
        })
    }

    fn prepare(conn: &Connection) -> Result<(), StorageError> {
        migrations::run_migrations(conn)?;
        queries::event_registry::seed(conn)?;
        Ok(())
    }

    /// Run `f` on the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Run `f` on a read connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        match &self.readers {
            Some(pool) => pool.with_conn(f),
            None => self.with_writer(f),
        }
    }

    /// WAL checkpoint (TRUNCATE), e.g. after a batch.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(to_storage_err)
        })
    }
}
