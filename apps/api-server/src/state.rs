//! Application state - shared across all handlers.

use std::sync::Arc;

use posts_core::ports::PostRepository;
use posts_infra::InMemoryPostRepository;

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use posts_infra::PostgresPostRepository;
#[cfg(feature = "postgres")]
use sea_orm::DbConn;

/// Errors raised while building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    #[cfg(feature = "postgres")]
    pub db: Option<DbConn>,
}

impl AppState {
    /// Build the application state from configuration.
    ///
    /// With `DATABASE_URL` set the PostgreSQL store is used and a failed
    /// connection aborts startup. Without it the in-memory store is used.
    pub async fn new(config: &AppConfig) -> Result<Self, StateError> {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            let conn = posts_infra::database::connect(db_config).await?;

            if config.run_migrations {
                tracing::info!("Applying pending migrations");
                Migrator::up(&conn, None).await?;
            }

            tracing::info!("Application state initialized (postgres)");
            return Ok(Self {
                posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                db: Some(conn),
            });
        }

        #[cfg(not(feature = "postgres"))]
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored - built without the postgres feature");
        }

        if config.database.is_none() {
            tracing::warn!("DATABASE_URL not set. Posts are kept in memory and lost on restart.");
        }
        if config.run_migrations {
            tracing::warn!("RUN_MIGRATIONS set but no database is in use");
        }

        tracing::info!("Application state initialized (in-memory)");
        Ok(Self::in_memory())
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()))
    }

    /// State backed by the given store, with no database handle.
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self {
            posts,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
