use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::error::{AppError, Result};
use crate::repositories::{
    memory::MemoryStore,
    postgres::PgStore,
    session::{MemorySessionStore, RedisSessionStore, SessionStore},
    store::Database,
};

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// Records: users, owned resources, categories, notifications, email logs.
    pub db: Arc<dyn Database>,
    /// Sessions and CSRF tokens.
    pub sessions: Arc<dyn SessionStore>,
    /// The application's configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new `AppState` for the configured storage backend.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        match config.storage_backend {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| AppError::Internal("DATABASE_URL is not set".to_string()))?;

                let pool = crate::db::create_pool(database_url)?;
                crate::db::apply_schema(&pool).await?;
                tracing::info!("✅ PostgreSQL Pool initialized with deadpool-postgres");

                let sessions = RedisSessionStore::connect(&config.redis_url).await?;
                tracing::info!("✅ Redis Connection Manager initialized");

                Ok(Self {
                    db: Arc::new(PgStore::new(pool)),
                    sessions: Arc::new(sessions),
                    config: Arc::new(config.clone()),
                })
            }
            StorageBackend::Memory => {
                tracing::warn!("⚠️ Using in-memory storage; data is lost on restart");
                Ok(Self::in_memory(config.clone()))
            }
        }
    }

    /// State backed by process-local stores.
    pub fn in_memory(config: Config) -> Self {
        Self {
            db: Arc::new(MemoryStore::new()),
            sessions: Arc::new(MemorySessionStore::new()),
            config: Arc::new(config),
        }
    }

    /// State over explicit stores.
    pub fn with_stores(
        config: Config,
        db: Arc<dyn Database>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            db,
            sessions,
            config: Arc::new(config),
        }
    }
}
