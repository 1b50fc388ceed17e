//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, background tasks, and the Axum
//! server lifecycle.

use crate::application::services::ExpirySweeper;
use crate::config::Config;
use crate::domain::click_recorder::QueuedClickRecorder;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::{NullCache, RedisCache, UrlCache};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::scheduler::spawn_periodic;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;

/// How long queued clicks may keep draining after the server stops.
const CLICK_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if no connection can be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Connects to Redis when configured, falling back to [`NullCache`].
pub async fn connect_cache(config: &Config) -> Arc<dyn UrlCache> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl, config.cache_op_timeout).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to connect to Redis, using NullCache");
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullCache fallback)
/// - Background click worker
/// - Periodic expiry sweeper
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the server drains in-flight requests, then the sweeper
/// is stopped and the click queue is given a short window to drain.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = connect_cache(&config).await;

    let pg_repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let repository: Arc<dyn UrlRepository> = pg_repository.clone();

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(click_rx, pg_repository.clone()));
    tracing::info!("Click worker started");

    let sweeper = Arc::new(ExpirySweeper::new(pg_repository, config.sweep_grace));
    let sweeper_handle = spawn_periodic(sweeper, config.sweep_interval, config.sweep_timeout);

    let click_queue = QueuedClickRecorder::new(click_tx);
    let state = AppState::new(
        repository,
        cache,
        Arc::new(click_queue.clone()),
        config.validity_window,
        &config.admin_api_key,
    )
    .with_click_queue(click_queue);

    let app = app_router(state, config.request_timeout);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper_handle.stop().await;

    // All senders went away with the router; the worker exits once drained.
    if tokio::time::timeout(CLICK_DRAIN_TIMEOUT, worker).await.is_err() {
        tracing::warn!("Click worker did not drain in time, pending clicks dropped");
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, initiating shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, initiating shutdown"),
    }
}
