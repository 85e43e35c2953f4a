//! Auth middleware for Axum routes.
//!
//! Validates `Authorization: Bearer <token>` headers and injects the decoded
//! [`Claims`](notekeep_core::Claims) into request extensions.

use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware that requires a valid bearer token.
///
/// # Behavior
/// 1. Missing or non-`Bearer` `Authorization` header → 401
/// 2. Bad signature, malformed or expired token → 401
/// 3. Otherwise the claims are attached to the request
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Unauthorized("Missing or malformed Authorization header".to_string())
        })?;

    let claims = state.tokens.verify(token)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
