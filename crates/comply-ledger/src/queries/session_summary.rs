//! Queries for the session_summary table.

use comply_core::errors::StorageError;
use comply_core::models::audit::format_timestamp;
use comply_core::models::{ComplianceGrade, SessionSummary};
use rusqlite::{params, Connection};

use super::parse_timestamp;
use crate::to_storage_err;

pub fn insert(conn: &Connection, summary: &SessionSummary) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO session_summary
            (session_id, file_name, pii_count, neutralization_count, trust_score,
             compliance_grade, processed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            summary.session_id,
            summary.file_name,
            summary.pii_count as i64,
            summary.neutralization_count as i64,
            summary.trust_score,
            summary.grade.as_str(),
            format_timestamp(&summary.processed_at),
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Rows of one session in insertion order.
pub fn query_by_session(conn: &Connection, session_id: &str) -> Result<Vec<SessionSummary>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT session_id, file_name, pii_count, neutralization_count, trust_score,
                    compliance_grade, processed_at
             FROM session_summary WHERE session_id = ?1 ORDER BY id",
        )
        .map_err(to_storage_err)?;
    let raw = stmt
        .query_map(params![session_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(to_storage_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_storage_err)?;

    raw.into_iter()
        .map(|(session_id, file_name, pii, neut, trust, grade, ts)| {
            let grade = ComplianceGrade::parse(&grade).ok_or_else(|| StorageError::CorruptRecord {
                details: format!("session_summary.compliance_grade: unknown value {grade:?}"),
            })?;
            Ok(SessionSummary {
                session_id,
                file_name,
                pii_count: pii.max(0) as usize,
                neutralization_count: neut.max(0) as usize,
                trust_score: trust,
                grade,
                processed_at: parse_timestamp("session_summary.processed_at", &ts)?,
            })
        })
        .collect()
}
