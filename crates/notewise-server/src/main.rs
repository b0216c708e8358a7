//! `notewise` server entry point.
//!
//! Bootstraps the record store and token codec from configuration, then
//! starts the Axum HTTP server with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use notewise_core::TokenCodec;
use notewise_storage::MemoryStore;

use notewise_server::build_router;
use notewise_server::config::{ServerConfig, StoreBackendType};
use notewise_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(store = ?config.store_backend, "notewise starting");

    let state = build_app_state(&config).await?;
    let app = build_router(Arc::clone(&state));

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "notewise server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("notewise server stopped");
    Ok(())
}

/// Build the shared application state from configuration.
async fn build_app_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    // Bootstrap the record store.
    let store: Arc<dyn notewise_storage::Store> = match &config.store_backend {
        StoreBackendType::Memory => {
            info!("using in-memory store (data will not persist)");
            Arc::new(MemoryStore::new())
        }
        #[cfg(feature = "postgres-backend")]
        StoreBackendType::Postgres { url } => {
            info!("using PostgreSQL store");
            Arc::new(
                notewise_storage::PgStore::connect(url)
                    .await
                    .context("failed to connect to PostgreSQL store")?,
            )
        }
        #[cfg(not(feature = "postgres-backend"))]
        StoreBackendType::Postgres { .. } => {
            anyhow::bail!(
                "PostgreSQL store requested but feature 'postgres-backend' is not enabled"
            );
        }
    };

    // Token signing secret. Without a configured secret, tokens are signed
    // with a random per-process key and do not survive a restart.
    let secret: Vec<u8> = match &config.jwt_secret {
        Some(s) => s.clone().into_bytes(),
        None => {
            warn!(
                "NOTEWISE_JWT_SECRET not set; using a random per-process secret, \
                 outstanding tokens will not survive a restart"
            );
            // Two UUID v4s = 32 bytes of OS CSPRNG randomness.
            let a = uuid::Uuid::new_v4();
            let b = uuid::Uuid::new_v4();
            let mut key = Vec::with_capacity(32);
            key.extend_from_slice(a.as_bytes());
            key.extend_from_slice(b.as_bytes());
            key
        }
    };

    Ok(Arc::new(AppState::new(store, TokenCodec::new(&secret))))
}

/// Wait for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
