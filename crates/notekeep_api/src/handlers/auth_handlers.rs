//! Signup and login endpoints.

use crate::error::{run_blocking, AppError};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notekeep_core::{CredentialService, SqliteUserRepository, UserPublic};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/signup` and `POST /api/login`.
///
/// Fields are optional so that missing values reach the service and get the
/// same error as empty ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPublic,
}

/// `POST /api/signup` → 201 with the public user record.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserPublic>), AppError> {
    let Json(req) = payload?;
    let user = run_blocking(move || {
        let service = credential_service(&state);
        Ok(service.register(
            req.username.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/login` → 200 with `{token, user}`.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;
    let session = run_blocking(move || {
        let service = credential_service(&state);
        Ok(service.authenticate(
            req.username.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )?)
    })
    .await?;

    Ok(Json(LoginResponse {
        token: session.token,
        user: session.user,
    }))
}

fn credential_service(state: &AppState) -> CredentialService<SqliteUserRepository<'_>> {
    CredentialService::with_hash_cost(
        SqliteUserRepository::new(&state.db),
        state.tokens.clone(),
        state.hash_cost,
    )
}
