//! # comply-ledger
//!
//! SQLite persistence for the audit chain. Audit records and final commits
//! are append-only (enforced by triggers); pending reviews move from
//! PENDING to APPROVED only through [`SqliteLedger::commit`](comply_core::traits::ApprovalGate::commit).

pub mod connection;
pub mod ledger;
pub mod migrations;
pub mod queries;

pub use connection::LedgerDatabase;
pub use ledger::SqliteLedger;

use comply_core::errors::StorageError;

/// Map a rusqlite error, separating busy/locked from everything else.
pub(crate) fn to_storage_err(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
            StorageError::Busy {
                message: e.to_string(),
            }
        }
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}
