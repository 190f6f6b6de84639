//! Schema migrations using PRAGMA user_version.

pub mod v001_audit_trail;
pub mod v002_review;
pub mod v003_reference;

use comply_core::errors::StorageError;
use rusqlite::Connection;

use crate::connection::writer::with_immediate_transaction;

/// Latest schema version.
pub const LATEST_VERSION: u32 = 3;

const MIGRATIONS: &[(&str, u32)] = &[
    (v001_audit_trail::MIGRATION_SQL, 1),
    (v002_review::MIGRATION_SQL, 2),
    (v003_reference::MIGRATION_SQL, 3),
];

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    apply(conn, MIGRATIONS)
}

/// Each step's schema and its `user_version` bump commit together.
fn apply(conn: &Connection, migrations: &[(&str, u32)]) -> Result<(), StorageError> {
    let current_version = current_version(conn).map_err(|e| StorageError::MigrationFailed {
        version: 0,
        reason: e.to_string(),
    })?;

    for &(sql, version) in migrations {
        if current_version >= version {
            continue;
        }
        let failed = |e: rusqlite::Error| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        };
        with_immediate_transaction(conn, |tx| {
            tx.execute_batch(sql).map_err(&failed)?;
            tx.pragma_update(None, "user_version", version).map_err(&failed)
        })?;
        tracing::info!(version = version, "applied migration");
    }

    Ok(())
}

/// Current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}
