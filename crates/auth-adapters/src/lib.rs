//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes carry their own salt and parameters as a PHC-format string
//! (`$argon2id$v=19$...`), so verification needs no extra stored state and
//! parameter upgrades only affect new hashes.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHasher as _};

use domains::{BoardError, PasswordHasher, Result};

/// Memory-hard hasher with the `argon2` crate's default (Argon2id) params.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| BoardError::storage(anyhow::anyhow!("argon2 hashing failed: {err}")))
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|err| {
            tracing::warn!(%err, "stored password hash is not a valid PHC string");
            BoardError::storage(anyhow::anyhow!("stored password hash is malformed"))
        })?;
        Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("correct horse battery", &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("correct horse battery").unwrap();
        assert!(!hasher.verify("incorrect horse", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("same input").unwrap();
        let second = hasher.hash("same input").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        let hasher = Argon2PasswordHasher;
        assert!(hasher.verify("anything", "not-a-phc-string").is_err());
    }
}
