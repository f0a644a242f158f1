// Password hashing and verification service

use crate::auth::error::AuthError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Password service wrapping Argon2id with per-password random salts
pub struct PasswordService;

impl PasswordService {
    /// Hash a password. Any internal failure surfaces as an error so a
    /// broken credential is never persisted.
    pub fn hash(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("argon2 hashing failed: {}", e);
                AuthError::PasswordHash
            })?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash.
    /// Errors only on a malformed hash string; a wrong password is Ok(false).
    pub fn verify(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            tracing::error!("stored password hash is malformed: {}", e);
            AuthError::PasswordHash
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = PasswordService::hash("secret123").unwrap();
        assert!(PasswordService::verify("secret123", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = PasswordService::hash("correct-horse-battery-staple").unwrap();
        assert!(!PasswordService::verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn hash_is_salted_and_never_empty() {
        let first = PasswordService::hash("secret123").unwrap();
        let second = PasswordService::hash("secret123").unwrap();
        assert!(!first.is_empty());
        // Random salts mean the same password never produces the same hash
        assert_ne!(first, second);
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(PasswordService::verify("anything", "not-a-valid-hash").is_err());
    }

    proptest! {
        // Argon2 is slow by design, so keep the case count small
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_roundtrip_accepts_original(password in "[a-zA-Z0-9!@#]{6,20}") {
            let hash = PasswordService::hash(&password).unwrap();
            prop_assert!(PasswordService::verify(&password, &hash).unwrap());
        }

        #[test]
        fn prop_different_password_rejected(
            password in "[a-z]{8,16}",
            other in "[A-Z]{8,16}"
        ) {
            let hash = PasswordService::hash(&password).unwrap();
            prop_assert!(!PasswordService::verify(&other, &hash).unwrap());
        }
    }
}
