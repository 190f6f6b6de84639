//! Queries for the final_commit table.

use comply_core::errors::StorageError;
use comply_core::models::audit::format_timestamp;
use comply_core::models::FinalCommit;
use rusqlite::{params, Connection, OptionalExtension};

use super::parse_timestamp;
use crate::to_storage_err;

/// Insert a commit. Fails if the filepath was already committed.
pub fn insert(conn: &Connection, commit: &FinalCommit) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO final_commit
            (filepath, content_sanitized, approver_id, approval_timestamp, certificate_hash)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            commit.filepath,
            commit.content_sanitized,
            commit.approver_id,
            format_timestamp(&commit.approval_timestamp),
            commit.certificate_hash,
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn get(conn: &Connection, filepath: &str) -> Result<Option<FinalCommit>, StorageError> {
    let row = conn
        .query_row(
            "SELECT filepath, content_sanitized, approver_id, approval_timestamp, certificate_hash
             FROM final_commit WHERE filepath = ?1",
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

    row.map(|(filepath, content_sanitized, approver_id, ts, certificate_hash)| {
        Ok(FinalCommit {
            filepath,
            content_sanitized,
            approver_id,
            approval_timestamp: parse_timestamp("final_commit.approval_timestamp", &ts)?,
            certificate_hash,
        })
    })
    .transpose()
}
