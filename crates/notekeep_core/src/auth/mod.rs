//! Credential and bearer-token primitives.
//!
//! # Responsibility
//! - Issue and verify HS256-signed session tokens.
//! - Define the error taxonomy shared by every authentication path.
//!
//! # Invariants
//! - "Unknown user" and "wrong password" map to the same
//!   [`AuthError::InvalidCredentials`] value and message.
//! - Tokens carry only `{id, username}` plus issue/expiry times.

use crate::repo::RepoError;
use thiserror::Error;

pub mod token;

pub use token::{Claims, TokenIssuer, DEFAULT_TOKEN_TTL_SECS};

/// Authentication-layer error.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input fields.
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("Username already exists")]
    DuplicateUsername,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error(transparent)]
    Repo(#[from] RepoError),
}
