//! HTTP boundary for notekeep.
//!
//! # Responsibility
//! - Translate REST requests into credential/note service calls.
//! - Own the mapping from typed service errors to HTTP status codes.
//!
//! # Invariants
//! - Handlers never touch SQL; all persistence goes through core services.
//! - Blocking work (SQLite, bcrypt) runs on the blocking thread pool.
//! - Internal failure details are logged, never returned to callers.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::{build_router, CorsOrigins};
pub use state::{AppState, ServerState};
