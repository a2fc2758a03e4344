//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::ports::{
    BlogRepository, CommentRepository, PasswordService, TokenService, UserRepository,
};
use inkwell_infra::{
    Argon2PasswordService, InMemoryBlogRepository, InMemoryCommentRepository,
    InMemoryUserRepository, JwtTokenService,
};

#[cfg(feature = "postgres")]
use inkwell_infra::database::{
    DatabaseConnections, PostgresBlogRepository, PostgresCommentRepository,
    PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state, using PostgreSQL when configured and
    /// reachable and the in-memory store otherwise.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        tracing::info!("Application state initialized (postgres)");
                        let db = connections.main;
                        return Self {
                            users: Arc::new(PostgresUserRepository::new(db.clone())),
                            blogs: Arc::new(PostgresBlogRepository::new(db.clone())),
                            comments: Arc::new(PostgresCommentRepository::new(db)),
                            tokens,
                            passwords,
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(tokens, passwords)
    }

    /// State backed entirely by the in-memory store.
    pub fn in_memory(tokens: Arc<dyn TokenService>, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            blogs: Arc::new(InMemoryBlogRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            tokens,
            passwords,
        }
    }
}
