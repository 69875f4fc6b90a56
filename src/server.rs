//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, sweeper spawning, and Axum server lifecycle.

use crate::application::services::ServiceSettings;
use crate::config::Config;
use crate::domain::repositories::RecordRepository;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::expiry_sweeper::run_expiry_sweeper;
use crate::infrastructure::persistence::{MemoryRecordRepository, PgRecordRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Where records are kept for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL at `DATABASE_URL`, with the Redis cache if configured.
    Postgres,
    /// Process-local store and cache. Everything is lost on exit.
    InMemory,
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or the in-memory store)
/// - Redis cache (or NullCache fallback)
/// - Background expiry sweeper
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` is missing in PostgreSQL mode
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config, backend: StoreBackend) -> Result<()> {
    let (repository, cache): (Arc<dyn RecordRepository>, Arc<dyn CacheService>) = match backend
    {
        StoreBackend::Postgres => {
            let pool = connect_database(&config).await?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations applied");

            let repository = Arc::new(PgRecordRepository::new(Arc::new(pool)));

            if config.sweep_interval_seconds > 0 {
                tokio::spawn(run_expiry_sweeper(
                    repository.clone(),
                    Duration::from_secs(config.sweep_interval_seconds),
                ));
            } else {
                tracing::info!("Expiry sweeper disabled");
            }

            let repository: Arc<dyn RecordRepository> = repository;
            (repository, build_cache(&config).await)
        }
        StoreBackend::InMemory => {
            tracing::warn!("Running with in-memory store; records are lost on exit");
            let repository: Arc<dyn RecordRepository> = Arc::new(MemoryRecordRepository::new());
            let cache: Arc<dyn CacheService> = Arc::new(MemoryCache::new());
            (repository, cache)
        }
    };

    let state = AppState::new(
        repository,
        cache,
        Arc::new(RandomCodeGenerator::new(config.code_length)),
        ServiceSettings::from_config(&config),
        config.base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Opens the PostgreSQL pool using the configured pool settings.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is not configured or the connection fails.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set (or use `serve --in-memory`)")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    Ok(pool)
}

/// Connects the Redis cache, falling back to [`NullCache`] when Redis is not
/// configured or unreachable.
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
