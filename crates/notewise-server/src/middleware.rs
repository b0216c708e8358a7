//! Authentication middleware — the access gate.
//!
//! Extracts the `Authorization: Bearer` header, resolves the principal
//! through `notewise_core::principal::resolve`, and injects it into the
//! request extensions for downstream handlers. Requests without a valid
//! header are rejected here, before any storage or domain code runs.
//!
//! This middleware and the role/tenant predicates in `notewise-core` are
//! the only places authorization decisions happen — handlers receive a
//! fully verified [`Principal`] and do not re-check authentication.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use notewise_core::principal::{self, bearer_token};

use crate::error::ApiError;
use crate::state::AppState;

/// Middleware that authenticates every request behind the gate.
///
/// # Errors
///
/// Returns `401 Unauthorized` when the `Authorization` header is missing,
/// not a `Bearer` scheme, or carries an invalid/expired token, and when
/// the token's user or tenant no longer resolves.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header) = header else {
        return Err(ApiError::Unauthorized(
            "missing Authorization header".to_owned(),
        ));
    };

    let Some(token) = bearer_token(header) else {
        return Err(ApiError::Unauthorized(
            "Authorization header must use Bearer scheme".to_owned(),
        ));
    };

    let principal = principal::resolve(state.store.as_ref(), &state.tokens, token).await?;
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
