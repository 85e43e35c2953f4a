//! Shared router state.

use notekeep_core::{Database, TokenIssuer, PASSWORD_HASH_COST};
use std::sync::Arc;

/// Process-wide handles injected into every handler.
#[derive(Debug)]
pub struct ServerState {
    /// The single migrated store handle, opened once at startup.
    pub db: Arc<Database>,
    pub tokens: TokenIssuer,
    pub hash_cost: u32,
    /// Deployment label reported by the health endpoint.
    pub environment: String,
}

pub type AppState = Arc<ServerState>;

impl ServerState {
    pub fn new(db: Arc<Database>, tokens: TokenIssuer) -> Self {
        Self {
            db,
            tokens,
            hash_cost: PASSWORD_HASH_COST,
            environment: "development".to_string(),
        }
    }

    pub fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.hash_cost = hash_cost;
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn into_shared(self) -> AppState {
        Arc::new(self)
    }
}
