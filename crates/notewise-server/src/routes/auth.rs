//! Authentication routes — login and session info.
//!
//! Login verifies credentials and issues a 24-hour bearer token. Unknown
//! email and wrong password produce byte-identical rejections. `/auth/me`
//! reports the live user and tenant state for the authenticated caller
//! (re-read from the store, not echoed from token claims).

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

use notewise_core::{Principal, principal};

use crate::error::ApiError;
use crate::state::AppState;

use super::UserSummary;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Response for the `/auth/me` endpoint.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserSummary,
}

/// Build the public auth router (no token required).
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/login", post(login))
}

/// Build the protected auth router (behind the gate).
pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}

/// `POST /api/auth/login` — verify credentials and issue a token.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "email and password are required".to_owned(),
        ));
    }

    let resolved =
        principal::authenticate(state.store.as_ref(), &body.email, &body.password).await?;
    let token = state.tokens.issue(&resolved.user)?;

    tracing::info!(user = %resolved.user.email, tenant = %resolved.tenant.slug, "login");

    Ok(Json(LoginResponse {
        token,
        user: UserSummary::from(&resolved),
    }))
}

/// `GET /api/auth/me` — current user and tenant summary.
async fn me(Extension(principal): Extension<Principal>) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserSummary::from(&principal),
    })
}
