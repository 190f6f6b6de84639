//! Write connection utilities: BEGIN IMMEDIATE transactions.

use comply_core::errors::StorageError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::to_storage_err;

/// Run `f` inside a BEGIN IMMEDIATE transaction. The write lock is taken
/// up front; the transaction rolls back if `f` fails.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(to_storage_err)?;

    let result = f(&tx)?;
    tx.commit().map_err(to_storage_err)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL)").unwrap();
        conn
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn commits_and_leaves_autocommit() {
        let conn = conn();
        let inserted = with_immediate_transaction(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", []).map_err(to_storage_err)
        })
        .unwrap();
        assert_eq!(inserted, 1);
        assert!(conn.is_autocommit());
        assert_eq!(count(&conn), 1);
    }

    #[test]
    fn consecutive_transactions_succeed() {
        let conn = conn();
        for v in 0..3 {
            with_immediate_transaction(&conn, |tx| {
                tx.execute("INSERT INTO t (v) VALUES (?1)", [v]).map_err(to_storage_err)
            })
            .unwrap();
        }
        assert_eq!(count(&conn), 3);
    }

    #[test]
    fn failure_rolls_back_and_frees_the_connection() {
        let conn = conn();
        let err = with_immediate_transaction(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", []).map_err(to_storage_err)?;
            tx.execute("INSERT INTO t (v) VALUES (NULL)", []).map_err(to_storage_err)
        });
        assert!(err.is_err());
        assert!(conn.is_autocommit());
        assert_eq!(count(&conn), 0);

        with_immediate_transaction(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (2)", []).map_err(to_storage_err)
        })
        .unwrap();
        assert_eq!(count(&conn), 1);
    }
}
