//! Error → HTTP status mapping.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use notekeep_core::{AuthError, NoteServiceError};

const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Boundary error; the only place status codes are chosen.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    /// Detail is logged and replaced by a generic message in the response.
    Internal(String),
}

impl AppError {
    pub fn note_not_found() -> Self {
        Self::NotFound("Note not found".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(detail) => {
                error!("event=http_error module=api status=error error={detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(msg) => AppError::BadRequest(msg.to_string()),
            AuthError::DuplicateUsername => AppError::Conflict(err.to_string()),
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                AppError::Unauthorized(err.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<NoteServiceError> for AppError {
    fn from(err: NoteServiceError) -> Self {
        match err {
            NoteServiceError::InvalidInput(validation) => {
                AppError::BadRequest(validation.to_string())
            }
            NoteServiceError::UnknownOwner => {
                AppError::Unauthorized(AuthError::InvalidToken.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Runs blocking store/hash work off the async executor.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| AppError::Internal(format!("blocking task failed: {err}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use notekeep_core::NoteValidationError;

    #[test]
    fn auth_errors_map_to_expected_variants() {
        assert!(matches!(
            AppError::from(AuthError::InvalidInput("Username and password are required")),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::DuplicateUsername),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::InvalidCredentials),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::InvalidToken),
            AppError::Unauthorized(_)
        ));
    }

    #[test]
    fn note_validation_maps_to_bad_request() {
        let err = AppError::from(NoteServiceError::InvalidInput(
            NoteValidationError::EmptyTitle,
        ));
        match err {
            AppError::BadRequest(msg) => assert_eq!(msg, "Title is required"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn unknown_note_owner_maps_to_unauthorized() {
        match AppError::from(NoteServiceError::UnknownOwner) {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Invalid or expired token"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let response =
            AppError::Internal("disk I/O error at /var/secret".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
