//! Tenant management routes.
//!
//! The upgrade endpoint is addressed by tenant slug and is admin-only.
//! Unlike id-addressed note lookups, acting on another tenant's slug is
//! an explicit 403 — the slug namespace is public, so there is no
//! existence information to hide. These two policies differ on purpose.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde::Serialize;

use notewise_core::{AuthError, Principal, principal};
use notewise_storage::models::{Role, Subscription, normalize_slug};

use crate::error::ApiError;
use crate::state::AppState;

use super::TenantSummary;

/// Response for a successful upgrade.
#[derive(Debug, Serialize)]
pub struct UpgradeResponse {
    pub message: String,
    pub tenant: TenantSummary,
}

/// Build the tenants router (behind the gate).
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/tenants/{slug}/upgrade", post(upgrade))
}

/// `POST /api/tenants/{slug}/upgrade` — upgrade a tenant to Pro.
///
/// Admin-only. The slug must resolve to the caller's own tenant;
/// another tenant's slug is rejected with 403, an unknown slug with 404.
/// Upgrading an already-Pro tenant is a no-op that succeeds.
async fn upgrade(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<Principal>,
    Path(slug): Path<String>,
) -> Result<Json<UpgradeResponse>, ApiError> {
    principal::require_role(&caller, Role::Admin)?;

    let slug = normalize_slug(&slug);
    let tenant = state
        .store
        .find_tenant_by_slug(&slug)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("tenant not found".to_owned()))?;

    if tenant.id != caller.tenant.id {
        return Err(AuthError::CrossTenant.into());
    }

    let updated = state
        .store
        .update_tenant_subscription(tenant.id, Subscription::Pro)
        .await?;

    tracing::info!(tenant = %updated.slug, by = %caller.user.email, "tenant upgraded to pro");

    Ok(Json(UpgradeResponse {
        message: "tenant upgraded to pro".to_owned(),
        tenant: TenantSummary::from(&updated),
    }))
}
