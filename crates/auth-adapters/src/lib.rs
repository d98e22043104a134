//! # auth-adapters
//!
//! Argon2-based implementation of `PasswordHasher`.
//! Used by the bulk loader for imported users and by the user service on registration.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2,
};
use domains::{DomainError, PasswordHasher, Result};

/// Hashes with a fresh random salt per password; the PHC string carries
/// algorithm, parameters and salt, so verification needs no extra state.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))
    }

    /// Verifies if a provided password matches a stored Argon2 hash.
    /// Unparseable hashes never match.
    fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is not a valid PHC string");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("nIGht7uLE").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "nIGht7uLE");
        assert!(hasher.verify_password("nIGht7uLE", &hash));
        assert!(!hasher.verify_password("night7ule", &hash));
    }

    #[test]
    fn test_salts_differ_per_hash() {
        let hasher = Argon2PasswordHasher::new();
        let a = hasher.hash_password("same").unwrap();
        let b = hasher.hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify_password("anything", "not-a-phc-string"));
    }
}
