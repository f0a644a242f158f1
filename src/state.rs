// Shared application state passed to every handler

use crate::auth::{service::AuthService, token::TokenService};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state shared across handlers.
/// The token service carries the read-only signing secret; nothing in here
/// is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: PgPool, tokens: TokenService) -> Self {
        let tokens = Arc::new(tokens);
        let auth = Arc::new(AuthService::new(db.clone(), tokens.clone()));
        Self { db, tokens, auth }
    }
}
