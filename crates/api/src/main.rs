mod config;
mod error;
mod middleware;
mod routes;
mod state;

use anyhow::Context;
use artwork_gallery_core::access::AllowAll;
use artwork_gallery_core::store::{MemoryArtworkStore, PgArtworkStore};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError, StorageBackend};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env().context("Failed to load config")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!(?config, "Starting artwork gallery API server");

    let state = connect_state(config.clone()).await?;

    let app = routes::build_app(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Open the configured storage backend once; it lives as long as the process.
async fn connect_state(config: AppConfig) -> anyhow::Result<AppState> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let options = config
                .database
                .as_ref()
                .ok_or(ConfigError::MissingDatabase)?
                .connect_options()
                .context("Invalid database settings")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .min_connections(config.db_min_connections)
                .connect_with(options)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to PostgreSQL");

            let store = PgArtworkStore::new(pool);
            store
                .migrate()
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Database migrations applied");

            if !store
                .unicode_case_folding()
                .await
                .context("Failed to inspect database locale")?
            {
                tracing::warn!(
                    "Database locale folds only ASCII; searches for non-ASCII text are case-sensitive"
                );
            }

            Ok(AppState::new(store, AllowAll, config))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; artworks are lost on restart");
            Ok(AppState::new(MemoryArtworkStore::new(), AllowAll, config))
        }
    }
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
