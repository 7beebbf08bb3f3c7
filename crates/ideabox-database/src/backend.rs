//! Opening, checking and closing the configured record store.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

use ideabox_core::config::{DatabaseBackend, DatabaseConfig};
use ideabox_core::error::{AppError, ErrorKind};
use ideabox_core::result::AppResult;

use crate::memory::MemoryStore;
use crate::store::Stores;

/// The live record store behind the application.
#[derive(Debug, Clone)]
pub enum RecordBackend {
    /// A PostgreSQL pool with the schema applied.
    Postgres(PgPool),
    /// Process-local state.
    Memory(MemoryStore),
}

impl RecordBackend {
    /// Open the backend selected by `config.backend`.
    ///
    /// For PostgreSQL this connects the pool and, unless disabled, applies
    /// pending migrations before any store is handed out.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Memory => {
                warn!("Using the in-memory record store; data is lost on shutdown");
                Ok(Self::memory())
            }
            DatabaseBackend::Postgres => {
                let options = connect_options(&config.url)?;
                info!(
                    host = options.get_host(),
                    port = options.get_port(),
                    database = options.get_database().unwrap_or("-"),
                    user = options.get_username(),
                    max_connections = config.max_connections,
                    "Opening PostgreSQL record store"
                );

                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .min_connections(config.min_connections)
                    .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
                    .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
                    .connect_with(options)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "PostgreSQL is unreachable", e)
                    })?;

                if config.run_migrations {
                    apply_schema(&pool).await?;
                } else {
                    info!("Schema migrations disabled; assuming the schema is current");
                }
                Ok(Self::Postgres(pool))
            }
        }
    }

    /// A fresh, empty in-memory backend.
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// The stores over this backend. Repeated calls share the same data.
    pub fn stores(&self) -> Stores {
        match self {
            Self::Postgres(pool) => Stores::postgres(pool.clone()),
            Self::Memory(store) => Stores::from_memory(store.clone()),
        }
    }

    /// Health label reported by `/api/health`: `ok`, `unavailable`, or
    /// `memory`.
    pub async fn health(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(pool) => {
                match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await {
                    Ok(_) => "ok",
                    Err(e) => {
                        warn!(error = %e, "Record store health check failed");
                        "unavailable"
                    }
                }
            }
        }
    }

    /// Release pooled connections. No-op for the memory backend.
    pub async fn close(&self) {
        if let Self::Postgres(pool) = self {
            pool.close().await;
            info!("PostgreSQL pool closed");
        }
    }
}

/// Malformed URLs are configuration errors, not connection failures.
fn connect_options(url: &str) -> AppResult<PgConnectOptions> {
    url.parse::<PgConnectOptions>().map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, "Invalid database.url", e)
    })
}

async fn apply_schema(pool: &PgPool) -> AppResult<()> {
    let migrator = sqlx::migrate!("../../migrations");
    let known = migrator.iter().count();
    migrator
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Schema migration failed", e))?;
    info!(known_migrations = known, "Record store schema is current");
    Ok(())
}
