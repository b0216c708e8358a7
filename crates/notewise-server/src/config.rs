//! Server configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `NOTEWISE_*` environment variables.
//! The JWT signing secret deliberately has no committed default — see
//! [`ServerConfig::from_env`].

use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Record store backend type.
    pub store_backend: StoreBackendType,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Shared JWT signing secret. `None` means no secret was configured;
    /// the server generates a random per-process secret and warns.
    pub jwt_secret: Option<String>,
}

/// Supported store backend types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackendType {
    /// In-memory (development and demos, data lost on restart).
    Memory,
    /// PostgreSQL (recommended for real deployments).
    Postgres { url: String },
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `NOTEWISE_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8600`)
    /// - `NOTEWISE_STORAGE` — `memory` or `postgres` (default: `memory`)
    /// - `DATABASE_URL` — PostgreSQL connection string (required when `NOTEWISE_STORAGE=postgres`)
    /// - `NOTEWISE_LOG_LEVEL` — log filter (default: `info`)
    /// - `NOTEWISE_JWT_SECRET` — shared token signing secret; when unset a
    ///   random per-process secret is used and outstanding tokens do not
    ///   survive a restart
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: NOTEWISE_BIND_ADDR > PORT > default 127.0.0.1:8600
        let bind_addr = if let Ok(addr) = std::env::var("NOTEWISE_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8600)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8600);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8600))
        };

        let store_backend = match std::env::var("NOTEWISE_STORAGE")
            .unwrap_or_else(|_| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => {
                let url = std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgres://localhost/notewise".to_owned());
                StoreBackendType::Postgres { url }
            }
            _ => StoreBackendType::Memory,
        };

        let log_level =
            std::env::var("NOTEWISE_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        let jwt_secret = std::env::var("NOTEWISE_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        Self {
            bind_addr,
            store_backend,
            log_level,
            jwt_secret,
        }
    }
}
