//! Application state management

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::TokenService;
use crate::config::Config;
use crate::generation::GenerationService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    db: SqlitePool,
    tokens: TokenService,
    generation: GenerationService,
}

impl AppState {
    /// Create a new application state from explicitly constructed handles
    pub fn new(config: Config, db: SqlitePool, generation: GenerationService) -> Self {
        let tokens = TokenService::new(&config.auth);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                tokens,
                generation,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the token service
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Get the generation service
    pub fn generation(&self) -> &GenerationService {
        &self.inner.generation
    }

    /// Release held resources
    ///
    /// Waits for in-flight queries and closes every pooled connection.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down application state...");
        self.inner.db.close().await;
    }
}
