//! Queries for the event_registry table.

use comply_core::errors::StorageError;
use comply_core::models::EventCode;
use rusqlite::{params, Connection};

use crate::to_storage_err;

/// A registry row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRegistryRow {
    pub event_code: String,
    pub category: String,
    pub source_tier: String,
    pub methodology: String,
    pub legal_basis: String,
}

/// Insert every known event code. Existing rows are left alone.
pub fn seed(conn: &Connection) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR IGNORE INTO event_registry
                (event_code, category, source_tier, methodology, legal_basis)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(to_storage_err)?;
    let mut inserted = 0;
    for code in EventCode::ALL {
        let (category, tier, methodology, legal) = code.registry_entry();
        inserted += stmt
            .execute(params![code.as_str(), category, tier, methodology, legal])
            .map_err(to_storage_err)?;
    }
    Ok(inserted)
}

pub fn list(conn: &Connection) -> Result<Vec<EventRegistryRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT event_code, category, source_tier, methodology, legal_basis
             FROM event_registry ORDER BY event_code",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(EventRegistryRow {
                event_code: row.get(0)?,
                category: row.get(1)?,
                source_tier: row.get(2)?,
                methodology: row.get(3)?,
                legal_basis: row.get(4)?,
            })
        })
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}
