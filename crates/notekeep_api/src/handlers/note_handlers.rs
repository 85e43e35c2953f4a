//! Owner-scoped note endpoints. Every handler requires [`AuthUser`].

use crate::auth::AuthUser;
use crate::error::{run_blocking, AppError};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use notekeep_core::{Note, NoteId, NotePatch, NoteService, SqliteNoteRepository};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNotesQuery {
    /// Optional substring filter over title and content.
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<UpdateNoteRequest> for NotePatch {
    fn from(req: UpdateNoteRequest) -> Self {
        NotePatch {
            title: req.title,
            content: req.content,
        }
    }
}

/// `GET /api/notes?q=` → notes of the caller, most recently updated first.
pub async fn list_notes(
    State(state): State<AppState>,
    user: AuthUser,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<Json<Vec<Note>>, AppError> {
    let Query(query) = query?;
    let notes = run_blocking(move || {
        let service = note_service(&state);
        let notes = match query.q.as_deref() {
            Some(q) if !q.is_empty() => service.search(user.user_id, q)?,
            _ => service.list(user.user_id)?,
        };
        Ok(notes)
    })
    .await?;

    Ok(Json(notes))
}

/// `POST /api/notes` → 201 with the created note.
pub async fn create_note(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let Json(req) = payload?;
    let note = run_blocking(move || {
        Ok(note_service(&state).create(
            user.user_id,
            req.title.as_deref().unwrap_or_default(),
            req.content.as_deref(),
        )?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// `GET /api/notes/{id}`.
pub async fn get_note(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Note>, AppError> {
    let Path(id) = id?;
    let note_id = parse_note_id(&id)?;
    let note = run_blocking(move || Ok(note_service(&state).get(user.user_id, note_id)?))
        .await?
        .ok_or_else(AppError::note_not_found)?;

    Ok(Json(note))
}

/// `PUT /api/notes/{id}` → merged update; absent fields are kept.
pub async fn update_note(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    let Path(id) = id?;
    let note_id = parse_note_id(&id)?;
    let Json(req) = payload?;
    let patch = NotePatch::from(req);
    let note = run_blocking(move || {
        Ok(note_service(&state).update(user.user_id, note_id, &patch)?)
    })
    .await?
    .ok_or_else(AppError::note_not_found)?;

    Ok(Json(note))
}

/// `DELETE /api/notes/{id}` → 204.
pub async fn delete_note(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let note_id = parse_note_id(&id)?;
    let deleted =
        run_blocking(move || Ok(note_service(&state).delete(user.user_id, note_id)?)).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::note_not_found())
    }
}

fn note_service(state: &AppState) -> NoteService<SqliteNoteRepository<'_>> {
    NoteService::new(SqliteNoteRepository::new(&state.db))
}

// A non-numeric id cannot name a stored note.
fn parse_note_id(raw: &str) -> Result<NoteId, AppError> {
    raw.parse::<NoteId>()
        .map_err(|_| AppError::note_not_found())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_note_id_accepts_integers_only() {
        assert_eq!(parse_note_id("42").unwrap(), 42);
        assert!(matches!(parse_note_id("abc"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_note_id(""), Err(AppError::NotFound(_))));
    }

    #[test]
    fn update_request_maps_to_partial_patch() {
        let req: UpdateNoteRequest = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        let patch = NotePatch::from(req);
        assert_eq!(patch.title, None);
        assert_eq!(patch.content.as_deref(), Some("x"));
    }
}
