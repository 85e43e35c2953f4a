//! Note use-case service.
//!
//! # Responsibility
//! - Provide owner-scoped create/list/search/get/update/delete APIs.
//! - Validate input before it reaches the repository.
//!
//! # Invariants
//! - Every call takes the authenticated `user_id`; notes of other users read
//!   as absent.
//! - `update` uses merge semantics and always advances `updated_at`.
//! - List and search results are sorted by `updated_at DESC`.

use crate::model::note::{validate_title, Note, NoteId, NotePatch, NoteValidationError};
use crate::model::now_epoch_ms;
use crate::model::user::UserId;
use crate::repo::note_repo::{NoteListQuery, NoteRepository};
use crate::repo::RepoError;
use log::info;
use thiserror::Error;

/// Service error for note use-cases.
#[derive(Debug, Error)]
pub enum NoteServiceError {
    #[error(transparent)]
    InvalidInput(#[from] NoteValidationError),
    /// The owner id names no account, e.g. a token minted against an
    /// earlier database.
    #[error("note owner does not exist")]
    UnknownOwner,
    #[error(transparent)]
    Repo(#[from] RepoError),
    /// Write succeeded but the row could not be read back.
    #[error("inconsistent note state: {0}")]
    InconsistentState(&'static str),
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note; `content` defaults to empty.
    pub fn create(
        &self,
        user_id: UserId,
        title: &str,
        content: Option<&str>,
    ) -> NoteServiceResult<Note> {
        validate_title(title)?;

        let note_id = self
            .repo
            .create_note(user_id, title, content.unwrap_or_default(), now_epoch_ms())
            .map_err(|err| match err {
                RepoError::ForeignKeyViolation(_) => NoteServiceError::UnknownOwner,
                other => NoteServiceError::Repo(other),
            })?;
        let note = self
            .repo
            .get_note(user_id, note_id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))?;
        info!(
            "event=note_create module=notes status=ok user_id={} note_id={}",
            user_id, note.id
        );
        Ok(note)
    }

    /// Lists all notes of `user_id`, most recently updated first.
    pub fn list(&self, user_id: UserId) -> NoteServiceResult<Vec<Note>> {
        Ok(self.repo.list_notes(user_id, &NoteListQuery::default())?)
    }

    /// Lists notes whose title or content contains `substring`.
    ///
    /// An empty substring matches every note.
    pub fn search(&self, user_id: UserId, substring: &str) -> NoteServiceResult<Vec<Note>> {
        let query = NoteListQuery {
            search: Some(substring.to_string()),
        };
        Ok(self.repo.list_notes(user_id, &query)?)
    }

    /// Gets one note. `None` covers both "missing" and "owned by someone else".
    pub fn get(&self, user_id: UserId, note_id: NoteId) -> NoteServiceResult<Option<Note>> {
        Ok(self.repo.get_note(user_id, note_id)?)
    }

    /// Merges `patch` into an owned note and returns the updated row.
    pub fn update(
        &self,
        user_id: UserId,
        note_id: NoteId,
        patch: &NotePatch,
    ) -> NoteServiceResult<Option<Note>> {
        patch.validate()?;

        if !self
            .repo
            .update_note(user_id, note_id, patch, now_epoch_ms())?
        {
            return Ok(None);
        }

        info!(
            "event=note_update module=notes status=ok user_id={} note_id={}",
            user_id, note_id
        );
        Ok(self.repo.get_note(user_id, note_id)?)
    }

    /// Deletes an owned note; returns whether a row was removed.
    pub fn delete(&self, user_id: UserId, note_id: NoteId) -> NoteServiceResult<bool> {
        let deleted = self.repo.delete_note(user_id, note_id)?;
        if deleted {
            info!(
                "event=note_delete module=notes status=ok user_id={} note_id={}",
                user_id, note_id
            );
        }
        Ok(deleted)
    }
}
