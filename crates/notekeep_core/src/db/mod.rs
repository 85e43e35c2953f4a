//! SQLite storage bootstrap, schema migrations and the persistence gateway.
//!
//! # Responsibility
//! - Open and configure the SQLite connection for notekeep.
//! - Apply schema migrations in deterministic order.
//! - Expose parameter-bound statement execution through [`Database`].
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - User input only ever reaches SQL through bound parameters.

use thiserror::Error;

mod gateway;
pub mod migrations;
mod open;

pub use gateway::{Database, ExecOutcome};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),
    #[error(
        "database schema version {db_version} is newer than supported {latest_supported}"
    )]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("database connection lock poisoned")]
    ConnectionPoisoned,
}

impl DbError {
    /// Returns whether this error is a `UNIQUE` constraint violation.
    ///
    /// Matches the driver's extended result code instead of the message text.
    pub fn is_unique_violation(&self) -> bool {
        self.constraint_code() == Some(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
    }

    /// Returns whether a `REFERENCES` target row was missing.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.constraint_code() == Some(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
    }

    fn constraint_code(&self) -> Option<std::os::raw::c_int> {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Some(err.extended_code)
            }
            _ => None,
        }
    }
}
