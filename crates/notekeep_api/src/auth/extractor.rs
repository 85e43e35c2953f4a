//! AuthUser extractor for Axum handlers.
//!
//! Reads the caller identity placed in request extensions by
//! [`require_auth`](super::require_auth).

use crate::error::AppError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use notekeep_core::{Claims, UserId};

/// Authenticated caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
}

impl From<&Claims> for AuthUser {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.id,
            username: claims.username.clone(),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user = parts
            .extensions
            .get::<Claims>()
            .map(AuthUser::from)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()));
        async move { user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_user_copies_identity_from_claims() {
        let claims = Claims {
            id: 3,
            username: "alice".to_string(),
            iat: 0,
            exp: 0,
        };

        let user = AuthUser::from(&claims);
        assert_eq!(user.user_id, 3);
        assert_eq!(user.username, "alice");
    }
}
