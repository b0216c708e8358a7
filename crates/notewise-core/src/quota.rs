//! Subscription-tier quota enforcement.
//!
//! Invoked immediately before creating a quota-bound resource. The
//! count-then-create sequence is a soft limit: two concurrent creations
//! by the same tenant can both pass the check and transiently exceed the
//! cap by one. That window is accepted semantics for this system — do
//! not close it with locking unless strict limits become a requirement.

use notewise_storage::Store;
use notewise_storage::models::{Subscription, Tenant};

use crate::error::AuthError;

/// Maximum notes a free-tier tenant may hold.
pub const FREE_NOTE_LIMIT: i64 = 3;

/// Reject note creation once a free-tier tenant reaches its cap.
///
/// Pro tenants are unlimited and skip the count entirely.
///
/// # Errors
///
/// Returns [`AuthError::QuotaExceeded`] with the limit reached, or
/// [`AuthError::Store`] if counting fails.
pub async fn check_note_quota(store: &dyn Store, tenant: &Tenant) -> Result<(), AuthError> {
    if tenant.subscription == Subscription::Pro {
        return Ok(());
    }

    let count = store.count_notes_for_tenant(tenant.id).await?;
    if count >= FREE_NOTE_LIMIT {
        tracing::debug!(tenant = %tenant.slug, count, "free-tier note quota reached");
        return Err(AuthError::QuotaExceeded {
            limit: FREE_NOTE_LIMIT,
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use notewise_storage::MemoryStore;
    use notewise_storage::models::Role;

    async fn tenant_with_notes(
        store: &MemoryStore,
        subscription: Subscription,
        notes: i64,
    ) -> Tenant {
        let tenant = store
            .create_tenant("Acme", "acme", subscription)
            .await
            .unwrap();
        let author = store
            .create_user("a@acme.test", "h", Role::Member, tenant.id)
            .await
            .unwrap();
        for i in 0..notes {
            store
                .create_note(tenant.id, author.id, &format!("n{i}"), "c")
                .await
                .unwrap();
        }
        tenant
    }

    #[tokio::test]
    async fn free_tier_allows_up_to_limit() {
        let store = MemoryStore::new();
        let tenant = tenant_with_notes(&store, Subscription::Free, FREE_NOTE_LIMIT - 1).await;
        assert!(check_note_quota(&store, &tenant).await.is_ok());
    }

    #[tokio::test]
    async fn free_tier_rejects_at_limit() {
        let store = MemoryStore::new();
        let tenant = tenant_with_notes(&store, Subscription::Free, FREE_NOTE_LIMIT).await;
        let err = check_note_quota(&store, &tenant).await.unwrap_err();
        assert!(matches!(err, AuthError::QuotaExceeded { limit } if limit == FREE_NOTE_LIMIT));
    }

    #[tokio::test]
    async fn pro_tier_is_unlimited() {
        let store = MemoryStore::new();
        let tenant = tenant_with_notes(&store, Subscription::Pro, FREE_NOTE_LIMIT + 5).await;
        assert!(check_note_quota(&store, &tenant).await.is_ok());
    }
}
