//! Domain records for Notewise.
//!
//! Tenants own users and notes. All IDs are UUIDs, all timestamps are UTC.
//! The `password_hash` field is never serialized — only the hash is ever
//! stored, never the plaintext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Tenants ──────────────────────────────────────────────────────────

/// Subscription tier for a tenant.
///
/// The only allowed transition is `Free` → `Pro`, triggered by an
/// authenticated admin of that tenant. There is no downgrade path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres-backend", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres-backend",
    sqlx(type_name = "text", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    Free,
    Pro,
}

impl std::fmt::Display for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Pro => write!(f, "pro"),
        }
    }
}

impl std::str::FromStr for Subscription {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            other => Err(format!("unknown subscription tier: {other}")),
        }
    }
}

/// A tenant (isolated organizational unit).
///
/// The slug is globally unique and lowercase-normalized at creation; it is
/// the human-readable address for tenant-level operations.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "postgres-backend", derive(sqlx::FromRow))]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub subscription: Subscription,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Users ────────────────────────────────────────────────────────────

/// User role within a tenant.
///
/// A closed enumeration with an explicit satisfaction predicate — role
/// checks never compare strings at call sites, so a typo cannot become an
/// authorization bypass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres-backend", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres-backend",
    sqlx(type_name = "text", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    /// Whether this role satisfies a required role.
    ///
    /// Admin is a superset role: it satisfies any requirement. A member
    /// only satisfies member-level requirements.
    #[must_use]
    pub const fn satisfies(self, required: Self) -> bool {
        matches!(self, Self::Admin) || matches!((self, required), (Self::Member, Self::Member))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A user account.
///
/// Belongs to exactly one tenant for its lifetime. Email is globally
/// unique and lowercase-normalized. Role and tenant are immutable after
/// creation.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "postgres-backend", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
    pub tenant_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ── Notes ────────────────────────────────────────────────────────────

/// A note — the quota-bound resource. Every note carries its owning
/// tenant reference; all queries are parameterized by it.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "postgres-backend", derive(sqlx::FromRow))]
pub struct Note {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalize an email address for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize a tenant slug for storage and lookup.
#[must_use]
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}
