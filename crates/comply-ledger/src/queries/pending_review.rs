//! Queries for the pending_review table.

use chrono::Utc;
use comply_core::errors::StorageError;
use comply_core::fingerprint::content_hash;
use comply_core::models::audit::format_timestamp;
use comply_core::models::{PendingReview, ReviewStatus, UpsertOutcome};
use rusqlite::{params, Connection, OptionalExtension};

use crate::to_storage_err;

/// Current status of `filepath`, if a row exists.
pub fn status_of(conn: &Connection, filepath: &str) -> Result<Option<ReviewStatus>, StorageError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT status FROM pending_review WHERE filepath = ?1",
            params![filepath],
            |row| row.get(0),
        )
        .optional()
        .map_err(to_storage_err)?;
    raw.map(|s| parse_status(&s)).transpose()
}

/// Create or refresh the PENDING row for `review.filepath`. The integrity
/// hash is recomputed from `final_content`. Approved rows are left alone.
///
/// Callers should run this inside a transaction so the status check and the
/// write see the same row.
pub fn upsert(conn: &Connection, review: &PendingReview) -> Result<UpsertOutcome, StorageError> {
    let outcome = match status_of(conn, &review.filepath)? {
        Some(ReviewStatus::Approved) => return Ok(UpsertOutcome::Locked),
        Some(ReviewStatus::Pending) => UpsertOutcome::Updated,
        None => UpsertOutcome::Inserted,
    };

    conn.execute(
        "INSERT INTO pending_review
            (filepath, original_content, final_content, status, content_integrity_hash, updated_at)
         VALUES (?1, ?2, ?3, 'PENDING', ?4, ?5)
         ON CONFLICT(filepath) DO UPDATE SET
            original_content = excluded.original_content,
            final_content = excluded.final_content,
            content_integrity_hash = excluded.content_integrity_hash,
            updated_at = excluded.updated_at
         WHERE pending_review.status = 'PENDING'",
        params![
            review.filepath,
            review.original_content,
            review.final_content,
            content_hash(&review.final_content),
            format_timestamp(&Utc::now()),
        ],
    )
    .map_err(to_storage_err)?;

    Ok(outcome)
}

pub fn get(conn: &Connection, filepath: &str) -> Result<Option<PendingReview>, StorageError> {
    let row = conn
        .query_row(
            "SELECT filepath, original_content, final_content, status, content_integrity_hash
             FROM pending_review WHERE filepath = ?1",
            params![filepath],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .optional()
        .map_err(to_storage_err)?;

    row.map(|(filepath, original_content, final_content, status, hash)| {
        Ok(PendingReview {
            filepath,
            original_content,
            final_content,
            status: parse_status(&status)?,
            content_integrity_hash: hash,
        })
    })
    .transpose()
}

/// Rows with the given status, ordered by filepath.
pub fn list_by_status(conn: &Connection, status: ReviewStatus) -> Result<Vec<PendingReview>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT filepath, original_content, final_content, content_integrity_hash
             FROM pending_review WHERE status = ?1 ORDER BY filepath",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![status.as_str()], |row| {
            Ok(PendingReview {
                filepath: row.get(0)?,
                original_content: row.get(1)?,
                final_content: row.get(2)?,
                status,
                content_integrity_hash: row.get(3)?,
            })
        })
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}

/// Flip a PENDING row to APPROVED. Returns false if no PENDING row matched.
pub fn mark_approved(conn: &Connection, filepath: &str) -> Result<bool, StorageError> {
    let changed = conn
        .execute(
            "UPDATE pending_review SET status = 'APPROVED', updated_at = ?2
             WHERE filepath = ?1 AND status = 'PENDING'",
            params![filepath, format_timestamp(&Utc::now())],
        )
        .map_err(to_storage_err)?;
    Ok(changed == 1)
}

fn parse_status(raw: &str) -> Result<ReviewStatus, StorageError> {
    ReviewStatus::parse(raw).ok_or_else(|| StorageError::CorruptRecord {
        details: format!("pending_review.status: unknown value {raw:?}"),
    })
}
