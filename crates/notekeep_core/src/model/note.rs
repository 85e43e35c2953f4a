//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note shape and the partial-update patch.
//! - Validate titles before any write reaches the store.
//!
//! # Invariants
//! - `title` is never blank.
//! - `updated_at >= created_at`, and every mutation strictly advances
//!   `updated_at`.

use super::user::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-generated note identifier.
pub type NoteId = i64;

/// Persisted note owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Owner reference; every read and write is scoped by it.
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Last mutation time in epoch milliseconds.
    pub updated_at: i64,
}

/// Partial update for a note. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    /// Validates the fields that are present.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        match self.title.as_deref() {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteValidationError {
    #[error("Title is required")]
    EmptyTitle,
}

/// Rejects blank titles.
pub fn validate_title(title: &str) -> Result<(), NoteValidationError> {
    if title.trim().is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_title, NotePatch, NoteValidationError};

    #[test]
    fn blank_titles_are_rejected() {
        assert_eq!(validate_title(""), Err(NoteValidationError::EmptyTitle));
        assert_eq!(validate_title("  \t"), Err(NoteValidationError::EmptyTitle));
        assert!(validate_title("A").is_ok());
    }

    #[test]
    fn patch_without_title_is_valid() {
        let patch = NotePatch {
            title: None,
            content: Some(String::new()),
        };
        assert!(patch.validate().is_ok());

        let blank = NotePatch {
            title: Some(" ".to_string()),
            content: None,
        };
        assert_eq!(blank.validate(), Err(NoteValidationError::EmptyTitle));
    }
}
