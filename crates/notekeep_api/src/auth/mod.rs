//! Bearer-token authentication for protected routes.

pub mod extractor;
pub mod middleware;

pub use extractor::AuthUser;
pub use middleware::require_auth;
