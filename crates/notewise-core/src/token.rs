//! Bearer token codec — HS256 JWTs with a fixed 24-hour lifetime.
//!
//! The token is the sole identity carrier between requests; there is no
//! server-side session store and no revocation list. Claims embed the
//! user's id, email, role, and tenant at issuance, but the server treats
//! only `sub` as authoritative — role and tenant are re-read from the
//! store on every request (see `principal::resolve`), so the embedded
//! copies are informational for clients displaying session state.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use notewise_storage::models::{Role, User};

use crate::error::AuthError;

/// Fixed token lifetime: 24 hours from issuance.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — user id. The only claim the server trusts as a lookup key.
    pub sub: Uuid,
    /// Email at issuance.
    pub email: String,
    /// Role at issuance (may be stale; never used for authorization).
    pub role: Role,
    /// Tenant at issuance (may be stale; never used for scoping).
    pub tenant_id: Uuid,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp). Always `iat + TOKEN_TTL_SECS`.
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a single shared symmetric secret.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec from the shared signing secret.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issue a signed token for a user, expiring 24 hours from now.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenInvalid`] if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            tenant_id: user.tenant_id,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(
            |e| AuthError::TokenInvalid {
                reason: format!("encode failed: {e}"),
            },
        )
    }

    /// Verify a token's signature, structure, and expiry.
    ///
    /// Verification is side-effect free: calling it twice on the same
    /// token yields identical claims. A failure never yields partial
    /// claims — expired-but-validly-signed tokens are rejected outright.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExpired`] for expired tokens and
    /// [`AuthError::TokenInvalid`] for every other defect.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid {
                    reason: e.to_string(),
                },
            })
    }
}
