//! Account records.

use serde::{Deserialize, Serialize};

/// Store-generated user identifier.
pub type UserId = i64;

/// Account record without credentials, safe to return to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: UserId,
    pub username: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

/// Account row including the stored password hash.
///
/// Only the credential service sees this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub created_at: i64,
}

impl UserRecord {
    /// Drops the hash and returns the public projection.
    pub fn into_public(self) -> UserPublic {
        UserPublic {
            id: self.id,
            username: self.username,
            created_at: self.created_at,
        }
    }
}
