//! API route handlers.
//!
//! All routes are nested under `/api`. Login, seed, and health are
//! public; everything else sits behind the auth middleware and receives
//! a verified [`Principal`](notewise_core::Principal) via request
//! extensions.

pub mod auth;
pub mod health;
pub mod notes;
pub mod seed;
pub mod tenants;

use serde::Serialize;
use uuid::Uuid;

use notewise_core::Principal;
use notewise_storage::models::{Role, Subscription, Tenant};

/// Tenant summary safe to return to clients.
#[derive(Debug, Serialize)]
pub struct TenantSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub subscription: Subscription,
}

impl From<&Tenant> for TenantSummary {
    fn from(t: &Tenant) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            slug: t.slug.clone(),
            subscription: t.subscription,
        }
    }
}

/// User-and-tenant summary returned by login and `/auth/me`.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub tenant: TenantSummary,
}

impl From<&Principal> for UserSummary {
    fn from(p: &Principal) -> Self {
        Self {
            id: p.user.id,
            email: p.user.email.clone(),
            role: p.user.role,
            tenant: TenantSummary::from(&p.tenant),
        }
    }
}
