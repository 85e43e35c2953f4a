//! Core domain logic for notekeep.
//! This crate is the single source of truth for account and note invariants.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::{AuthError, Claims, TokenIssuer, DEFAULT_TOKEN_TTL_SECS};
pub use db::{open_db, open_db_in_memory, Database, DbError, DbResult, ExecOutcome};
pub use logging::{default_log_level, init_logging};
pub use model::note::{Note, NoteId, NotePatch, NoteValidationError};
pub use model::user::{UserId, UserPublic};
pub use repo::note_repo::{NoteListQuery, NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::credential_service::{CredentialService, Session, PASSWORD_HASH_COST};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
