//! Port for one-way password hashing.

use crate::domain::PasswordHash;

/// Errors raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hashing primitive failed to produce a hash.
    #[error("password hashing failed: {message}")]
    Hashing {
        /// Adapter-supplied detail.
        message: String,
    },
    /// A stored hash could not be parsed.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash {
        /// Adapter-supplied detail.
        message: String,
    },
}

impl PasswordHashError {
    /// Hashing failure with `message`.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    /// Unparsable stored hash, described by `message`.
    pub fn malformed_hash(message: impl Into<String>) -> Self {
        Self::MalformedHash {
            message: message.into(),
        }
    }
}

/// Hashes plaintext passwords and checks them against stored hashes.
///
/// Implementations are CPU bound and synchronous. A mismatch is `Ok(false)`;
/// `Err` is reserved for hashes that cannot be processed at all.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted, encoded hash of `plaintext`.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `plaintext` against an encoded hash.
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
