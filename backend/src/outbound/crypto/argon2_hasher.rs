//! Argon2id implementation of the password hasher port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! parameters travel with each hash and older hashes keep verifying after
//! the defaults change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with a random per-hash salt.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher using the crate's recommended Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when the parameters are out of
    /// range for Argon2.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordHash::from_encoded(hash.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcHash::new(hash.expose())
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        Ok(self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(1024, 1, 1).expect("valid test params")
    }

    #[rstest]
    fn hash_is_phc_and_verifies(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("s3cret!").expect("hashing succeeds");
        assert!(hash.expose().starts_with("$argon2id$"));
        assert_ne!(hash.expose(), "s3cret!");
        assert!(hasher.verify("s3cret!", &hash).expect("verifiable"));
    }

    #[rstest]
    fn wrong_password_does_not_verify(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("s3cret!").expect("hashing succeeds");
        assert!(!hasher.verify("s3cret?", &hash).expect("verifiable"));
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("same").expect("hashing succeeds");
        let second = hasher.hash("same").expect("hashing succeeds");
        assert_ne!(first, second);
    }

    #[rstest]
    fn hashes_from_other_parameters_still_verify(hasher: Argon2PasswordHasher) {
        let stronger = Argon2PasswordHasher::with_params(2048, 2, 1).expect("valid params");
        let hash = stronger.hash("s3cret!").expect("hashing succeeds");
        assert!(hasher.verify("s3cret!", &hash).expect("verifiable"));
    }

    #[rstest]
    fn malformed_hash_is_an_error(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("s3cret!", &PasswordHash::from_encoded("plaintext-by-mistake"))
            .expect_err("malformed hash must fail");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }

    #[rstest]
    fn out_of_range_params_are_rejected() {
        assert!(Argon2PasswordHasher::with_params(1, 1, 1).is_err());
    }
}
