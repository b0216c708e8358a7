//! Storage layer for Notewise.
//!
//! This crate defines the [`Store`] trait — the narrow query surface the
//! auth core and HTTP handlers depend on. Handlers never construct raw
//! queries; every note operation is parameterized by a tenant id so that
//! tenant isolation is enforced by the query predicate itself.
//!
//! Two implementations are provided:
//!
//! - [`MemoryStore`] — in-memory, the default for development and tests
//! - [`PgStore`] — PostgreSQL via sqlx (feature `postgres-backend`)

mod error;
mod memory;
pub mod models;
#[cfg(feature = "postgres-backend")]
mod postgres;

pub use error::StoreError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres-backend")]
pub use postgres::PgStore;

use uuid::Uuid;

use models::{Note, Role, Subscription, Tenant, User};

/// The record store behind the Notewise service.
///
/// Lookups return `Ok(None)` for missing rows. Tenant-scoped note
/// operations conjoin the note id with the tenant id — a note that exists
/// but belongs to another tenant is indistinguishable from a missing one.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait Store: Send + Sync + 'static {
    // ── Users ────────────────────────────────────────────────────────

    /// Create a user. Email must already be normalized.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the email is taken.
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
        tenant_id: Uuid,
    ) -> Result<User, StoreError>;

    /// Find a user by normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Find a user by id.
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    // ── Tenants ──────────────────────────────────────────────────────

    /// Create a tenant. Slug must already be normalized.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the slug is taken.
    async fn create_tenant(
        &self,
        name: &str,
        slug: &str,
        subscription: Subscription,
    ) -> Result<Tenant, StoreError>;

    /// Find a tenant by id.
    async fn find_tenant_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError>;

    /// Find a tenant by normalized slug.
    async fn find_tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError>;

    /// Update a tenant's subscription tier, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the tenant does not exist.
    async fn update_tenant_subscription(
        &self,
        id: Uuid,
        subscription: Subscription,
    ) -> Result<Tenant, StoreError>;

    // ── Notes ────────────────────────────────────────────────────────

    /// Create a note owned by the given tenant and author.
    async fn create_note(
        &self,
        tenant_id: Uuid,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Note, StoreError>;

    /// List a tenant's notes, newest first.
    async fn list_notes(&self, tenant_id: Uuid) -> Result<Vec<Note>, StoreError>;

    /// Fetch a note by id, scoped to the given tenant.
    ///
    /// Returns `Ok(None)` both when the note does not exist and when it
    /// belongs to a different tenant.
    async fn get_note(&self, id: Uuid, tenant_id: Uuid) -> Result<Option<Note>, StoreError>;

    /// Update a note's title and content, scoped to the given tenant.
    ///
    /// Returns `Ok(None)` when no note matches both id and tenant.
    async fn update_note(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, StoreError>;

    /// Delete a note by id, scoped to the given tenant.
    ///
    /// Returns `Ok(false)` when no note matches both id and tenant.
    async fn delete_note(&self, id: Uuid, tenant_id: Uuid) -> Result<bool, StoreError>;

    /// Count the notes owned by a tenant (quota input).
    async fn count_notes_for_tenant(&self, tenant_id: Uuid) -> Result<i64, StoreError>;

    // ── Maintenance ──────────────────────────────────────────────────

    /// Delete all records. Used by the demo seed endpoint.
    async fn clear_all(&self) -> Result<(), StoreError>;
}
