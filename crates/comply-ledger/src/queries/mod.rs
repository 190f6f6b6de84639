//! Query modules, one per table.

pub mod audit_trail;
pub mod event_registry;
pub mod final_commit;
pub mod neutral_terms;
pub mod pending_review;
pub mod session_summary;

use chrono::{DateTime, Utc};
use comply_core::errors::StorageError;

/// Parse a stored RFC 3339 timestamp.
pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptRecord {
            details: format!("{column}: invalid timestamp {value:?}: {e}"),
        })
}
