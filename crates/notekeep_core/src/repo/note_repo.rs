//! Note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped note persistence APIs.
//! - Keep search pattern construction inside the persistence boundary.
//!
//! # Invariants
//! - Every statement carries `user_id = ?`; rows of other owners are
//!   indistinguishable from missing rows.
//! - Lists are ordered by `updated_at DESC, id DESC`.
//! - Updates merge absent fields and strictly advance `updated_at`.

use crate::db::Database;
use crate::model::note::{Note, NoteId, NotePatch};
use crate::model::user::UserId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    content,
    created_at,
    updated_at
FROM notes";

/// Query options for note list use-cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListQuery {
    /// Optional substring matched against title or content.
    pub search: Option<String>,
}

/// Repository interface for owner-scoped note operations.
pub trait NoteRepository {
    /// Inserts one note and returns its store-generated id.
    fn create_note(
        &self,
        user_id: UserId,
        title: &str,
        content: &str,
        now_ms: i64,
    ) -> RepoResult<NoteId>;
    /// Gets one note owned by `user_id`.
    fn get_note(&self, user_id: UserId, note_id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists notes owned by `user_id`, optionally filtered by substring.
    fn list_notes(&self, user_id: UserId, query: &NoteListQuery) -> RepoResult<Vec<Note>>;
    /// Applies `patch` and returns whether an owned row was updated.
    fn update_note(
        &self,
        user_id: UserId,
        note_id: NoteId,
        patch: &NotePatch,
        now_ms: i64,
    ) -> RepoResult<bool>;
    /// Deletes one owned note and returns whether a row was removed.
    fn delete_note(&self, user_id: UserId, note_id: NoteId) -> RepoResult<bool>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'db> {
    db: &'db Database,
}

impl<'db> SqliteNoteRepository<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(
        &self,
        user_id: UserId,
        title: &str,
        content: &str,
        now_ms: i64,
    ) -> RepoResult<NoteId> {
        let outcome = self
            .db
            .execute(
                "INSERT INTO notes (user_id, title, content, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4);",
                params![user_id, title, content, now_ms],
            )
            .map_err(|err| {
                if err.is_foreign_key_violation() {
                    RepoError::ForeignKeyViolation("notes.user_id")
                } else {
                    RepoError::Db(err)
                }
            })?;
        Ok(outcome.last_insert_id)
    }

    fn get_note(&self, user_id: UserId, note_id: NoteId) -> RepoResult<Option<Note>> {
        let note = self.db.query_one(
            &format!(
                "{NOTE_SELECT_SQL}
                 WHERE id = ?1
                   AND user_id = ?2;"
            ),
            params![note_id, user_id],
            parse_note_row,
        )?;
        Ok(note)
    }

    fn list_notes(&self, user_id: UserId, query: &NoteListQuery) -> RepoResult<Vec<Note>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE user_id = ?");
        let mut bind_values: Vec<Value> = vec![Value::Integer(user_id)];

        if let Some(search) = query.search.as_deref() {
            sql.push_str(" AND (title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\')");
            let pattern = like_contains_pattern(search);
            bind_values.push(Value::Text(pattern.clone()));
            bind_values.push(Value::Text(pattern));
        }

        sql.push_str(" ORDER BY updated_at DESC, id DESC");

        let notes = self
            .db
            .query_all(&sql, params_from_iter(bind_values), parse_note_row)?;
        Ok(notes)
    }

    fn update_note(
        &self,
        user_id: UserId,
        note_id: NoteId,
        patch: &NotePatch,
        now_ms: i64,
    ) -> RepoResult<bool> {
        let outcome = self.db.execute(
            "UPDATE notes
             SET
                title = COALESCE(?3, title),
                content = COALESCE(?4, content),
                updated_at = MAX(updated_at + 1, ?5)
             WHERE id = ?1
               AND user_id = ?2;",
            params![
                note_id,
                user_id,
                patch.title.as_deref(),
                patch.content.as_deref(),
                now_ms,
            ],
        )?;
        Ok(outcome.rows_affected > 0)
    }

    fn delete_note(&self, user_id: UserId, note_id: NoteId) -> RepoResult<bool> {
        let outcome = self.db.execute(
            "DELETE FROM notes
             WHERE id = ?1
               AND user_id = ?2;",
            params![note_id, user_id],
        )?;
        Ok(outcome.rows_affected > 0)
    }
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with `%`, `_` and
/// `\` in the needle taken literally (escape character `\`).
pub fn like_contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::like_contains_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_contains_pattern(""), "%%");
        assert_eq!(like_contains_pattern("abc"), "%abc%");
        assert_eq!(like_contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_contains_pattern("a\\b"), "%a\\\\b%");
    }
}
