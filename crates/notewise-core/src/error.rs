//! Error taxonomy for the auth core.
//!
//! Unknown email and wrong password collapse into one variant so both
//! failure modes produce an identical rejection. Malformed stored hashes
//! are treated the same way (see `password::verify`).

use notewise_storage::StoreError;
use notewise_storage::models::Role;

/// Errors from authentication and authorization.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password — reported identically.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token is missing, malformed, unsigned, or references a
    /// principal that no longer resolves.
    #[error("invalid token: {reason}")]
    TokenInvalid { reason: String },

    /// The token's signature is valid but its expiry has passed.
    #[error("token expired")]
    TokenExpired,

    /// The principal's role does not satisfy the required role.
    #[error("{required} role required")]
    InsufficientRole { required: Role },

    /// An authenticated user acted on another tenant's slug-addressed
    /// resource.
    #[error("access denied: wrong tenant")]
    CrossTenant,

    /// The tenant's subscription tier does not allow creating more notes.
    #[error("note limit reached: free tier allows {limit} notes")]
    QuotaExceeded { limit: i64 },

    /// Password hashing failed. Never carries the plaintext.
    #[error("credential hashing failed: {reason}")]
    Hash { reason: String },

    /// The store failed while resolving or checking a principal.
    #[error(transparent)]
    Store(#[from] StoreError),
}
