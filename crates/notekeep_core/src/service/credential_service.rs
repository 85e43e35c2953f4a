//! Account registration and login use-cases.
//!
//! # Responsibility
//! - Hash and verify passwords with bcrypt.
//! - Issue and verify session tokens for authenticated users.
//!
//! # Invariants
//! - Password hashes never leave this service.
//! - Unknown usernames and wrong passwords are reported identically, and
//!   both paths run one bcrypt verification.
//! - Duplicate usernames are detected from the insert itself, so two
//!   concurrent signups for the same name yield exactly one account.

use crate::auth::{AuthError, Claims, TokenIssuer};
use crate::model::now_epoch_ms;
use crate::model::user::UserPublic;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use log::{info, warn};
use once_cell::sync::Lazy;

/// bcrypt work factor used for stored password hashes.
pub const PASSWORD_HASH_COST: u32 = 10;

// Verified against when the username is unknown so both failure paths cost
// one bcrypt round.
static DUMMY_PASSWORD_HASH: Lazy<Option<String>> =
    Lazy::new(|| bcrypt::hash("notekeep-absent-user", PASSWORD_HASH_COST).ok());

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserPublic,
}

/// Credential use-case service over a user repository.
pub struct CredentialService<R: UserRepository> {
    repo: R,
    tokens: TokenIssuer,
    hash_cost: u32,
}

impl<R: UserRepository> CredentialService<R> {
    /// Creates a service hashing at [`PASSWORD_HASH_COST`].
    pub fn new(repo: R, tokens: TokenIssuer) -> Self {
        Self::with_hash_cost(repo, tokens, PASSWORD_HASH_COST)
    }

    /// Creates a service with an explicit bcrypt cost (tests use the minimum).
    pub fn with_hash_cost(repo: R, tokens: TokenIssuer, hash_cost: u32) -> Self {
        Self {
            repo,
            tokens,
            hash_cost,
        }
    }

    /// Registers a new account and returns its public record.
    ///
    /// # Errors
    /// - `InvalidInput` when username is blank or password is empty.
    /// - `DuplicateUsername` when the store already holds the username.
    pub fn register(&self, username: &str, password: &str) -> Result<UserPublic, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput(
                "Username and password are required",
            ));
        }

        let password_hash = bcrypt::hash(password, self.hash_cost)?;
        match self
            .repo
            .insert_user(username, &password_hash, now_epoch_ms())
        {
            Ok(user) => {
                info!(
                    "event=user_register module=credential status=ok user_id={}",
                    user.id
                );
                Ok(user)
            }
            Err(RepoError::UniqueViolation(_)) => {
                warn!("event=user_register module=credential status=rejected reason=duplicate_username");
                Err(AuthError::DuplicateUsername)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    /// - `InvalidCredentials` for unknown usernames, wrong passwords and
    ///   empty fields alike.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let Some(record) = self.repo.find_by_username(username)? else {
            if let Some(dummy) = DUMMY_PASSWORD_HASH.as_deref() {
                let _ = bcrypt::verify(password, dummy);
            }
            warn!("event=user_login module=credential status=rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !bcrypt::verify(password, &record.password_hash)? {
            warn!("event=user_login module=credential status=rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let user = record.into_public();
        let token = self.tokens.issue(&user)?;
        info!(
            "event=user_login module=credential status=ok user_id={}",
            user.id
        );
        Ok(Session { token, user })
    }

    /// Validates a session token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }
}
