//! Domain model for accounts and notes.
//!
//! # Responsibility
//! - Define the records exchanged between repositories, services and callers.
//! - Hold field-level validation shared by every write path.
//!
//! # Invariants
//! - Identifiers are store-generated integers and never reused.
//! - Timestamps are Unix epoch milliseconds.
//! - Password hashes never appear on a public record.

pub mod note;
pub mod user;

/// Returns the current time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
