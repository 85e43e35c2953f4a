//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQL details from service/business orchestration.
//!
//! # Invariants
//! - Every note statement is scoped by `user_id`; a note id alone never
//!   selects, changes or removes a row.
//! - Constraint violations surface as semantic errors, not driver errors.

use crate::db::DbError;
use thiserror::Error;

pub mod note_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    /// A `UNIQUE` constraint rejected the write. Holds `table.column`.
    #[error("unique constraint violated on {0}")]
    UniqueViolation(&'static str),
    /// A `REFERENCES` constraint rejected the write. Holds `table.column`.
    #[error("foreign key constraint violated on {0}")]
    ForeignKeyViolation(&'static str),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
