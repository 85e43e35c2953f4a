//! Session token encoding and decoding using HS256.

use super::AuthError;
use crate::model::user::{UserId, UserPublic};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Default session lifetime: 7 days.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: UserId,
    pub username: String,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
}

/// Signs and validates session tokens with one shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    /// Creates an issuer for `secret` with the default 7-day lifetime.
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidInput("token secret must not be empty"));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        })
    }

    /// Overrides the token lifetime.
    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Issues a token for `user`, expiring `ttl_secs` from now.
    pub fn issue(&self, user: &UserPublic) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthError::Signing)
    }

    /// Validates signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

impl Debug for TokenIssuer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-minimum-32-chars!!";

    fn alice() -> UserPublic {
        UserPublic {
            id: 7,
            username: "alice".to_string(),
            created_at: 0,
        }
    }

    #[test]
    fn issue_verify_roundtrip_carries_identity() {
        let issuer = TokenIssuer::new(TEST_SECRET).unwrap();
        let token = issuer.issue(&alice()).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new(TEST_SECRET).unwrap();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: 7,
            username: "alice".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(issuer.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = TokenIssuer::new(TEST_SECRET).unwrap();
        let other = TokenIssuer::new("wrong-secret-that-is-also-32chars!").unwrap();
        let token = other.issue(&alice()).unwrap();

        assert!(matches!(issuer.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let issuer = TokenIssuer::new(TEST_SECRET).unwrap();
        for token in ["", "not.a.valid.jwt", "just-random-text"] {
            assert!(
                matches!(issuer.verify(token), Err(AuthError::InvalidToken)),
                "token `{token}` should be rejected"
            );
        }
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            TokenIssuer::new(""),
            Err(AuthError::InvalidInput(_))
        ));
    }
}
