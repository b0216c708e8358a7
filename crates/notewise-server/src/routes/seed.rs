//! Demo seed route.
//!
//! Resets the store and loads the demo dataset: two free-tier tenants
//! (`acme`, `globex`) with an admin and a member each, all with password
//! `password`. Public by design — this endpoint exists for demos and
//! test environments, not production deployments.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use notewise_core::password;
use notewise_storage::models::{Role, Subscription};

use crate::error::ApiError;
use crate::state::AppState;

use super::TenantSummary;

/// A seeded user, echoed back for convenience.
#[derive(Debug, Serialize)]
pub struct SeededUser {
    pub email: String,
    pub role: Role,
    pub tenant_slug: String,
}

/// Response for the seed endpoint.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub tenants: Vec<TenantSummary>,
    pub users: Vec<SeededUser>,
}

/// Build the seed router (public).
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/seed", post(seed))
}

/// `POST /api/seed` — reset and reseed the demo dataset.
async fn seed(State(state): State<Arc<AppState>>) -> Result<Json<SeedResponse>, ApiError> {
    let store = state.store.as_ref();
    store.clear_all().await?;

    let acme = store
        .create_tenant("Acme", "acme", Subscription::Free)
        .await?;
    let globex = store
        .create_tenant("Globex", "globex", Subscription::Free)
        .await?;

    let accounts = [
        ("admin@acme.test", Role::Admin, &acme),
        ("user@acme.test", Role::Member, &acme),
        ("admin@globex.test", Role::Admin, &globex),
        ("user@globex.test", Role::Member, &globex),
    ];

    let mut users = Vec::with_capacity(accounts.len());
    for (email, role, tenant) in accounts {
        let hash = password::hash("password")?;
        let user = store.create_user(email, &hash, role, tenant.id).await?;
        users.push(SeededUser {
            email: user.email,
            role: user.role,
            tenant_slug: tenant.slug.clone(),
        });
    }

    tracing::info!("demo data seeded");

    Ok(Json(SeedResponse {
        message: "database seeded".to_owned(),
        tenants: vec![TenantSummary::from(&acme), TenantSummary::from(&globex)],
        users,
    }))
}
