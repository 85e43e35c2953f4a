//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist accounts and look them up by username.
//!
//! # Invariants
//! - Duplicate usernames are detected from the store's `UNIQUE` constraint
//!   at insert time, never by a prior existence check.

use crate::db::Database;
use crate::model::user::{UserPublic, UserRecord};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Row};

/// Repository interface for account persistence.
pub trait UserRepository {
    /// Inserts a user; fails with `UniqueViolation` when the name is taken.
    fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        created_at: i64,
    ) -> RepoResult<UserPublic>;
    /// Loads the full record (including hash) for credential checks.
    fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'db> {
    db: &'db Database,
}

impl<'db> SqliteUserRepository<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        created_at: i64,
    ) -> RepoResult<UserPublic> {
        let outcome = self
            .db
            .execute(
                "INSERT INTO users (username, password_hash, created_at)
                 VALUES (?1, ?2, ?3);",
                params![username, password_hash, created_at],
            )
            .map_err(|err| {
                if err.is_unique_violation() {
                    RepoError::UniqueViolation("users.username")
                } else {
                    RepoError::Db(err)
                }
            })?;

        Ok(UserPublic {
            id: outcome.last_insert_id,
            username: username.to_string(),
            created_at,
        })
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>> {
        let user = self.db.query_one(
            "SELECT id, username, password_hash, created_at
             FROM users
             WHERE username = ?1;",
            [username],
            parse_user_row,
        )?;
        Ok(user)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        created_at: row.get("created_at")?,
    })
}
