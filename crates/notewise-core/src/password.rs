//! Credential verification using Argon2id.
//!
//! Hashes use the PHC string format with the crate's default parameters —
//! a fixed, documented work factor. Comparison happens inside the argon2
//! primitive, which is constant-time.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

/// Hash a plaintext password with a fresh random salt.
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if hashing fails. The error never carries
/// the plaintext.
pub fn hash(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hash {
            reason: e.to_string(),
        })
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// A malformed stored hash verifies as `false` rather than surfacing a
/// distinct error — callers cannot tell a corrupt hash apart from a wrong
/// password, so neither can a client probing the login endpoint.
#[must_use]
pub fn verify(plaintext: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = argon2::PasswordHash::new(stored_hash) else {
        tracing::debug!("stored password hash failed to parse, rejecting");
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let h = hash("password").unwrap();
        assert!(verify("password", &h));
    }

    #[test]
    fn wrong_password_fails() {
        let h = hash("password").unwrap();
        assert!(!verify("passwordd", &h));
        assert!(!verify("Password", &h));
        assert!(!verify("", &h));
    }

    #[test]
    fn empty_password_roundtrips() {
        let h = hash("").unwrap();
        assert!(verify("", &h));
        assert!(!verify("x", &h));
    }

    #[test]
    fn malformed_hash_rejects_like_wrong_password() {
        assert!(!verify("password", "not-a-phc-hash"));
        assert!(!verify("password", ""));
    }

    #[test]
    fn hashes_are_salted() {
        let h1 = hash("password").unwrap();
        let h2 = hash("password").unwrap();
        assert_ne!(h1, h2);
    }
}
