//! Persistence gateway over a single SQLite connection.
//!
//! # Responsibility
//! - Execute parameter-bound statements and report mutation outcomes.
//! - Map result rows through caller-provided row mappers.
//!
//! # Invariants
//! - The connection lock is held for exactly one gateway call and released
//!   before returning; callers never observe the guard.
//! - `last_insert_id` is read under the same lock as the statement that
//!   produced it.

use super::{DbError, DbResult};
use rusqlite::{Connection, Params, Row};
use std::sync::{Mutex, MutexGuard};

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Row id of the most recent successful `INSERT` on this connection.
    pub last_insert_id: i64,
    /// Number of rows changed by the statement.
    pub rows_affected: usize,
}

/// Process-wide handle to the migrated SQLite store.
///
/// Construct through [`crate::db::open_db`] or
/// [`crate::db::open_db_in_memory`], then share it (usually as
/// `Arc<Database>`) with repositories.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub(crate) fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Runs one `INSERT`/`UPDATE`/`DELETE` statement.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> DbResult<ExecOutcome> {
        let conn = self.lock()?;
        let rows_affected = conn.execute(sql, params)?;
        Ok(ExecOutcome {
            last_insert_id: conn.last_insert_rowid(),
            rows_affected,
        })
    }

    /// Returns the first row mapped through `map`, or `None` for no rows.
    pub fn query_one<T, P, F>(&self, sql: &str, params: P, map: F) -> DbResult<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let item = match rows.next()? {
            Some(row) => Some(map(row)?),
            None => None,
        };
        Ok(item)
    }

    /// Returns every row mapped through `map`, in statement order.
    pub fn query_all<T, P, F>(&self, sql: &str, params: P, mut map: F) -> DbResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(map(row)?);
        }
        Ok(items)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::ConnectionPoisoned)
    }
}
