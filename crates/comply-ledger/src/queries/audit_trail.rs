//! Queries for the audit_trail table: append-only log of pipeline events.

use comply_core::errors::StorageError;
use comply_core::models::audit::format_timestamp;
use comply_core::models::{AuditRecord, EventCode};
use rusqlite::{params, Connection, Row};

use super::parse_timestamp;
use crate::to_storage_err;

/// Append records. Rows whose `record_id` already exists are skipped.
/// Returns the number of rows actually inserted.
pub fn insert_records(conn: &Connection, records: &[AuditRecord]) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR IGNORE INTO audit_trail
                (record_id, filepath, timestamp, event_code, pii_fingerprint,
                 confidence_score, description, integrity_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(to_storage_err)?;

    let mut inserted = 0;
    for r in records {
        inserted += stmt
            .execute(params![
                r.record_id,
                r.filepath,
                format_timestamp(&r.timestamp),
                r.event_code.as_str(),
                r.pii_fingerprint,
                r.confidence_score,
                r.description,
                r.integrity_hash,
            ])
            .map_err(to_storage_err)?;
    }
    Ok(inserted)
}

const SELECT_COLUMNS: &str = "SELECT record_id, filepath, timestamp, event_code, pii_fingerprint,
        confidence_score, description, integrity_hash FROM audit_trail";

struct RawRow {
    record_id: String,
    filepath: String,
    timestamp: String,
    event_code: String,
    pii_fingerprint: Option<String>,
    confidence_score: f64,
    description: String,
    integrity_hash: String,
}

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        record_id: row.get(0)?,
        filepath: row.get(1)?,
        timestamp: row.get(2)?,
        event_code: row.get(3)?,
        pii_fingerprint: row.get(4)?,
        confidence_score: row.get(5)?,
        description: row.get(6)?,
        integrity_hash: row.get(7)?,
    })
}

fn into_record(raw: RawRow) -> Result<AuditRecord, StorageError> {
    let event_code = EventCode::parse(&raw.event_code).ok_or_else(|| StorageError::CorruptRecord {
        details: format!("unknown event code {:?} in record {}", raw.event_code, raw.record_id),
    })?;
    Ok(AuditRecord {
        timestamp: parse_timestamp("audit_trail.timestamp", &raw.timestamp)?,
        record_id: raw.record_id,
        filepath: raw.filepath,
        event_code,
        pii_fingerprint: raw.pii_fingerprint,
        confidence_score: raw.confidence_score,
        description: raw.description,
        integrity_hash: raw.integrity_hash,
    })
}

/// Records for one document in emission order.
pub fn query_by_filepath(conn: &Connection, filepath: &str) -> Result<Vec<AuditRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT_COLUMNS} WHERE filepath = ?1 ORDER BY seq"))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![filepath], raw_row)
        .map_err(to_storage_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_storage_err)?;
    rows.into_iter().map(into_record).collect()
}

/// Records sharing a PII fingerprint, across documents.
pub fn query_by_fingerprint(conn: &Connection, fingerprint: &str) -> Result<Vec<AuditRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT_COLUMNS} WHERE pii_fingerprint = ?1 ORDER BY seq"))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![fingerprint], raw_row)
        .map_err(to_storage_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_storage_err)?;
    rows.into_iter().map(into_record).collect()
}

pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM audit_trail", [], |row| row.get(0))
        .map_err(to_storage_err)
}

/// Record ids whose stored integrity hash does not match their fields.
pub fn find_tampered(conn: &Connection, filepath: &str) -> Result<Vec<String>, StorageError> {
    Ok(query_by_filepath(conn, filepath)?
        .into_iter()
        .filter(|r| !r.verify_integrity())
        .map(|r| r.record_id)
        .collect())
}
