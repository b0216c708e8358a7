//! Principal resolution and access predicates.
//!
//! A [`Principal`] is the resolved `{user, tenant}` pair for one request.
//! It is derived from a verified token plus a fresh store read and lives
//! only as long as the request — never cached or shared.
//!
//! Resolution deliberately re-reads the user and tenant from the store
//! instead of trusting the role and tenant embedded in the token. This
//! costs one storage read per request but closes the stale-privilege
//! window: a demoted admin's still-valid token loses admin rights on the
//! very next request.

use notewise_storage::Store;
use notewise_storage::models::{Role, Tenant, User, normalize_email};

use crate::error::AuthError;
use crate::password;
use crate::token::TokenCodec;

/// The authenticated caller: a user together with its owning tenant.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user: User,
    pub tenant: Tenant,
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme must be exactly `Bearer <token>`; anything else (missing
/// scheme, other schemes, empty token) yields `None`.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() { None } else { Some(token) }
}

/// Verify a token and resolve the current principal from the store.
///
/// Any anomaly fails closed: bad signature, expiry, a user that no
/// longer exists, or a tenant that cannot be found all end in a 401-class
/// error, never a partially trusted principal.
///
/// # Errors
///
/// Returns [`AuthError::TokenInvalid`] / [`AuthError::TokenExpired`] for
/// token defects, the same for dangling user or tenant references, and
/// [`AuthError::Store`] if the store itself fails.
pub async fn resolve(
    store: &dyn Store,
    codec: &TokenCodec,
    token: &str,
) -> Result<Principal, AuthError> {
    let claims = codec.verify(token)?;

    let user = store
        .find_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| AuthError::TokenInvalid {
            reason: "user no longer exists".to_owned(),
        })?;

    let tenant = store
        .find_tenant_by_id(user.tenant_id)
        .await?
        .ok_or_else(|| AuthError::TokenInvalid {
            reason: "tenant no longer exists".to_owned(),
        })?;

    Ok(Principal { user, tenant })
}

/// Check a user's credentials and resolve their principal.
///
/// Unknown email, wrong password, and a dangling tenant reference all
/// produce the same [`AuthError::InvalidCredentials`] so the login
/// endpoint cannot be used to probe which accounts exist.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] on any verification failure
/// and [`AuthError::Store`] if the store fails.
pub async fn authenticate(
    store: &dyn Store,
    email: &str,
    plaintext_password: &str,
) -> Result<Principal, AuthError> {
    let email = normalize_email(email);

    let Some(user) = store.find_user_by_email(&email).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    if !password::verify(plaintext_password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let tenant = store
        .find_tenant_by_id(user.tenant_id)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    Ok(Principal { user, tenant })
}

/// Require that the principal's role satisfies `required`.
///
/// Admin satisfies any requirement; a member never satisfies an
/// admin-only check.
///
/// # Errors
///
/// Returns [`AuthError::InsufficientRole`] when the predicate fails.
pub fn require_role(principal: &Principal, required: Role) -> Result<(), AuthError> {
    if principal.user.role.satisfies(required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole { required })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use notewise_storage::MemoryStore;
    use notewise_storage::models::Subscription;

    const SECRET: &[u8] = b"principal-test-secret";

    async fn seeded() -> (MemoryStore, Principal) {
        let store = MemoryStore::new();
        let tenant = store
            .create_tenant("Acme", "acme", Subscription::Free)
            .await
            .unwrap();
        let hash = password::hash("password").unwrap();
        let user = store
            .create_user("user@acme.test", &hash, Role::Member, tenant.id)
            .await
            .unwrap();
        (store, Principal { user, tenant })
    }

    #[test]
    fn bearer_extraction_is_strict() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("bearer abc"), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[tokio::test]
    async fn resolve_returns_live_store_state() {
        let (store, p) = seeded().await;
        let codec = TokenCodec::new(SECRET);

        // Forge a token whose embedded role claims admin. The stored user
        // is a member; resolution must come back with the stored role.
        let mut inflated = p.user.clone();
        inflated.role = Role::Admin;
        let token = codec.issue(&inflated).unwrap();

        let resolved = resolve(&store, &codec, &token).await.unwrap();
        assert_eq!(resolved.user.role, Role::Member);
        assert_eq!(resolved.tenant.id, p.tenant.id);
    }

    #[tokio::test]
    async fn resolve_fails_for_deleted_user() {
        let (store, p) = seeded().await;
        let codec = TokenCodec::new(SECRET);
        let mut ghost = p.user.clone();
        ghost.id = uuid::Uuid::new_v4();
        let token = codec.issue(&ghost).unwrap();

        assert!(matches!(
            resolve(&store, &codec, &token).await,
            Err(AuthError::TokenInvalid { .. })
        ));
    }

    #[tokio::test]
    async fn authenticate_happy_path() {
        let (store, p) = seeded().await;
        let resolved = authenticate(&store, "User@Acme.TEST", "password")
            .await
            .unwrap();
        assert_eq!(resolved.user.id, p.user.id);
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_and_wrong_identically() {
        let (store, _) = seeded().await;

        let unknown = authenticate(&store, "nobody@acme.test", "password").await;
        let wrong = authenticate(&store, "user@acme.test", "wrong").await;

        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn require_role_matrix() {
        let (_, p) = seeded().await;
        assert!(require_role(&p, Role::Member).is_ok());
        assert!(matches!(
            require_role(&p, Role::Admin),
            Err(AuthError::InsufficientRole { required: Role::Admin })
        ));

        let mut admin = p.clone();
        admin.user.role = Role::Admin;
        assert!(require_role(&admin, Role::Member).is_ok());
        assert!(require_role(&admin, Role::Admin).is_ok());
    }
}
