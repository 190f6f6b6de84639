//! Queries for the neutral_terms reference table.

use chrono::Utc;
use comply_core::errors::StorageError;
use comply_core::models::audit::format_timestamp;
use comply_core::models::NeutralTerm;
use rusqlite::{params, Connection};

use crate::to_storage_err;

/// Insert or replace terms keyed by `original`. Returns rows written.
pub fn upsert_terms(conn: &Connection, terms: &[NeutralTerm]) -> Result<usize, StorageError> {
    let now = format_timestamp(&Utc::now());
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO neutral_terms (original, neutral, category, last_updated)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(original) DO UPDATE SET
                neutral = excluded.neutral,
                category = excluded.category,
                last_updated = excluded.last_updated",
        )
        .map_err(to_storage_err)?;
    let mut written = 0;
    for t in terms {
        written += stmt
            .execute(params![t.original, t.neutral, t.category, now])
            .map_err(to_storage_err)?;
    }
    Ok(written)
}

pub fn load_all(conn: &Connection) -> Result<Vec<NeutralTerm>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT original, neutral, category FROM neutral_terms ORDER BY original")
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(NeutralTerm {
                original: row.get(0)?,
                neutral: row.get(1)?,
                category: row.get(2)?,
            })
        })
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}

pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM neutral_terms", [], |row| row.get(0))
        .map_err(to_storage_err)
}

/// Parse a comma-separated seed list (`original,neutral[,category]`).
///
/// Blank lines and `#` comments are skipped, as is a leading header row
/// starting with `original`.
pub fn parse_seed(text: &str) -> Result<Vec<NeutralTerm>, StorageError> {
    let mut terms = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if terms.is_empty() && line.to_lowercase().starts_with("original") {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [original, neutral] if !original.is_empty() && !neutral.is_empty() => {
                terms.push(NeutralTerm::new(*original, *neutral, ""));
            }
            [original, neutral, category] if !original.is_empty() && !neutral.is_empty() => {
                terms.push(NeutralTerm::new(*original, *neutral, *category));
            }
            _ => {
                return Err(StorageError::CorruptRecord {
                    details: format!("seed line {}: expected original,neutral[,category]", idx + 1),
                })
            }
        }
    }
    Ok(terms)
}
