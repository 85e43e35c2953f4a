//! Request handlers grouped by resource.

pub mod auth_handlers;
pub mod health;
pub mod note_handlers;
