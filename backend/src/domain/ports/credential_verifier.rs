//! Port for verifying login credentials against stored records.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials};

/// Checks an identifier and secret and yields the verified principal.
///
/// The principal type is fixed by the implementation, so callers receive a
/// typed value instead of an opaque object they must downcast.
#[cfg_attr(test, mockall::automock(type Principal = crate::domain::User;))]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verified identity produced on success.
    type Principal: Send;

    /// Verify `credentials`, failing with an `unauthorized` error when they
    /// do not match a stored record.
    async fn verify(&self, credentials: &LoginCredentials) -> Result<Self::Principal, Error>;
}
