//! In-memory store for development and testing.
//!
//! All records live in `BTreeMap`s behind a `RwLock`. Nothing is
//! persistent — data is lost when the process exits. This is the default
//! backend so the service runs without a database, and the substrate for
//! the integration tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Note, Role, Subscription, Tenant, User};
use crate::{Store, StoreError};

#[derive(Debug, Default)]
struct Tables {
    tenants: BTreeMap<Uuid, Tenant>,
    users: BTreeMap<Uuid, User>,
    notes: BTreeMap<Uuid, Note>,
}

/// An in-memory record store.
///
/// Thread-safe and async-compatible. Clones share the same underlying
/// tables, mirroring how a connection pool shares one database.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
        tenant_id: Uuid,
    ) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == email) {
            return Err(StoreError::Conflict {
                reason: format!("email '{email}' already registered"),
            });
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            role,
            tenant_id,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn create_tenant(
        &self,
        name: &str,
        slug: &str,
        subscription: Subscription,
    ) -> Result<Tenant, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.tenants.values().any(|t| t.slug == slug) {
            return Err(StoreError::Conflict {
                reason: format!("slug '{slug}' already taken"),
            });
        }
        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            slug: slug.to_owned(),
            subscription,
            created_at: now,
            updated_at: now,
        };
        tables.tenants.insert(tenant.id, tenant.clone());
        Ok(tenant)
    }

    async fn find_tenant_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.tenants.get(&id).cloned())
    }

    async fn find_tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.tenants.values().find(|t| t.slug == slug).cloned())
    }

    async fn update_tenant_subscription(
        &self,
        id: Uuid,
        subscription: Subscription,
    ) -> Result<Tenant, StoreError> {
        let mut tables = self.tables.write().await;
        let tenant = tables.tenants.get_mut(&id).ok_or_else(|| StoreError::NotFound {
            what: format!("tenant {id}"),
        })?;
        tenant.subscription = subscription;
        tenant.updated_at = Utc::now();
        Ok(tenant.clone())
    }

    async fn create_note(
        &self,
        tenant_id: Uuid,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Note, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            tenant_id,
            author_id,
            title: title.to_owned(),
            content: content.to_owned(),
            created_at: now,
            updated_at: now,
        };
        tables.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list_notes(&self, tenant_id: Uuid) -> Result<Vec<Note>, StoreError> {
        let tables = self.tables.read().await;
        let mut notes: Vec<Note> = tables
            .notes
            .values()
            .filter(|n| n.tenant_id == tenant_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn get_note(&self, id: Uuid, tenant_id: Uuid) -> Result<Option<Note>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .get(&id)
            .filter(|n| n.tenant_id == tenant_id)
            .cloned())
    }

    async fn update_note(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(note) = tables.notes.get_mut(&id).filter(|n| n.tenant_id == tenant_id) else {
            return Ok(None);
        };
        note.title = title.to_owned();
        note.content = content.to_owned();
        note.updated_at = Utc::now();
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: Uuid, tenant_id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let matches = tables
            .notes
            .get(&id)
            .is_some_and(|n| n.tenant_id == tenant_id);
        if matches {
            tables.notes.remove(&id);
        }
        Ok(matches)
    }

    async fn count_notes_for_tenant(&self, tenant_id: Uuid) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        let count = tables
            .notes
            .values()
            .filter(|n| n.tenant_id == tenant_id)
            .count();
        Ok(count as i64)
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.notes.clear();
        tables.users.clear();
        tables.tenants.clear();
        tracing::debug!("in-memory store cleared");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn two_tenants(store: &MemoryStore) -> (Tenant, Tenant) {
        let acme = store
            .create_tenant("Acme", "acme", Subscription::Free)
            .await
            .unwrap();
        let globex = store
            .create_tenant("Globex", "globex", Subscription::Free)
            .await
            .unwrap();
        (acme, globex)
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let (acme, globex) = two_tenants(&store).await;
        store
            .create_user("a@acme.test", "h", Role::Member, acme.id)
            .await
            .unwrap();
        let err = store
            .create_user("a@acme.test", "h", Role::Member, globex.id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts() {
        let store = MemoryStore::new();
        store
            .create_tenant("Acme", "acme", Subscription::Free)
            .await
            .unwrap();
        let err = store
            .create_tenant("Acme Two", "acme", Subscription::Free)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn get_note_is_tenant_scoped() {
        let store = MemoryStore::new();
        let (acme, globex) = two_tenants(&store).await;
        let author = store
            .create_user("a@acme.test", "h", Role::Member, acme.id)
            .await
            .unwrap();
        let note = store
            .create_note(acme.id, author.id, "t", "c")
            .await
            .unwrap();

        // Visible to its own tenant, invisible to another.
        assert!(store.get_note(note.id, acme.id).await.unwrap().is_some());
        assert!(store.get_note(note.id, globex.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_and_delete_are_tenant_scoped() {
        let store = MemoryStore::new();
        let (acme, globex) = two_tenants(&store).await;
        let author = store
            .create_user("a@acme.test", "h", Role::Member, acme.id)
            .await
            .unwrap();
        let note = store
            .create_note(acme.id, author.id, "t", "c")
            .await
            .unwrap();

        assert!(
            store
                .update_note(note.id, globex.id, "x", "y")
                .await
                .unwrap()
                .is_none()
        );
        assert!(!store.delete_note(note.id, globex.id).await.unwrap());

        // Still present and unchanged for the owner.
        let fetched = store.get_note(note.id, acme.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "t");

        assert!(store.delete_note(note.id, acme.id).await.unwrap());
        assert!(store.get_note(note.id, acme.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn count_only_counts_own_tenant() {
        let store = MemoryStore::new();
        let (acme, globex) = two_tenants(&store).await;
        let author = store
            .create_user("a@acme.test", "h", Role::Member, acme.id)
            .await
            .unwrap();
        for i in 0..3 {
            store
                .create_note(acme.id, author.id, &format!("n{i}"), "c")
                .await
                .unwrap();
        }
        assert_eq!(store.count_notes_for_tenant(acme.id).await.unwrap(), 3);
        assert_eq!(store.count_notes_for_tenant(globex.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_notes_newest_first() {
        let store = MemoryStore::new();
        let (acme, _) = two_tenants(&store).await;
        let author = store
            .create_user("a@acme.test", "h", Role::Member, acme.id)
            .await
            .unwrap();
        let first = store.create_note(acme.id, author.id, "first", "c").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.create_note(acme.id, author.id, "second", "c").await.unwrap();

        let notes = store.list_notes(acme.id).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, second.id);
        assert_eq!(notes[1].id, first.id);
    }

    #[tokio::test]
    async fn upgrade_updates_subscription() {
        let store = MemoryStore::new();
        let (acme, _) = two_tenants(&store).await;
        let updated = store
            .update_tenant_subscription(acme.id, Subscription::Pro)
            .await
            .unwrap();
        assert_eq!(updated.subscription, Subscription::Pro);

        let err = store
            .update_tenant_subscription(Uuid::new_v4(), Subscription::Pro)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        let tenant = store
            .create_tenant("Acme", "acme", Subscription::Free)
            .await
            .unwrap();
        assert!(clone.find_tenant_by_id(tenant.id).await.unwrap().is_some());
    }
}
