//! Auth core for Notewise — the multi-tenant note service.
//!
//! Everything with a real invariant lives here: credential verification,
//! bearer-token issuance and verification, principal resolution, role
//! checks, and subscription-tier quota enforcement. The HTTP layer in
//! `notewise-server` wires these into routes; the storage layer in
//! `notewise-storage` supplies the narrow query surface they depend on.
//!
//! # Trust model
//!
//! - Tokens are HS256 JWTs with a fixed 24-hour TTL, signed with a single
//!   shared secret from process configuration.
//! - Only the token's `sub` claim is authoritative: role and tenant are
//!   re-read from the store on every request, so revoking privileges
//!   takes effect immediately despite outstanding tokens.
//! - Tenant isolation is enforced by query predicates (every tenant-owned
//!   read and write is parameterized by the resolved principal's tenant),
//!   never by client-supplied tenant identifiers.

pub mod error;
pub mod password;
pub mod principal;
pub mod quota;
pub mod token;

pub use error::AuthError;
pub use principal::Principal;
pub use token::TokenCodec;
