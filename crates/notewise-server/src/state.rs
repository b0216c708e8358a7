//! Shared application state.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the record store and the token
//! codec — nothing request-scoped lives here; the resolved principal is
//! carried per-request in extensions.

use std::sync::Arc;

use notewise_core::TokenCodec;
use notewise_storage::Store;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The record store (memory or PostgreSQL).
    pub store: Arc<dyn Store>,
    /// Signs and verifies bearer tokens.
    pub tokens: TokenCodec,
}

impl AppState {
    /// Bundle a store and token codec into shared state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, tokens: TokenCodec) -> Self {
        Self { store, tokens }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
