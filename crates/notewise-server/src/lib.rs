//! HTTP server for the notewise multi-tenant note service.
//!
//! Exposes the authentication and note API over Axum. Routes split into
//! a public set (login, seed, health) and a protected set gated by the
//! bearer-token middleware. All routes are nested under `/api`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware as axum_mw;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full API router.
///
/// The protected routes carry the auth middleware as a `route_layer`, so
/// unknown paths still 404 instead of 401. Public routes are merged in
/// unguarded.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .merge(routes::auth::protected_router())
        .merge(routes::notes::router())
        .merge(routes::tenants::router())
        .route_layer(axum_mw::from_fn_with_state(
            Arc::clone(&state),
            middleware::auth_middleware,
        ));

    // Concurrency-limit the seed route — it rewrites the whole store.
    let seed = Router::new()
        .merge(routes::seed::router())
        .layer(tower::limit::ConcurrencyLimitLayer::new(1));

    let public = Router::new()
        .merge(routes::auth::public_router())
        .merge(seed)
        .merge(routes::health::router());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api", protected.merge(public))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}
