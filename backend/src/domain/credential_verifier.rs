//! Credential verification backed by the user store and password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::ports::{CredentialVerifier, PasswordHasher, UserRepository};
use super::{EmailAddress, Error, LoginCredentials, User};

/// Message returned for every credential mismatch.
pub const BAD_CREDENTIALS: &str = "Bad credentials";

/// Verifies credentials by looking the user up by email and checking the
/// password against the stored hash.
///
/// Unknown emails and wrong passwords fail identically. An unknown email
/// still pays for one hash computation so both paths take similar time.
#[derive(Clone)]
pub struct RepositoryCredentialVerifier {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RepositoryCredentialVerifier {
    /// Verifier over the user store and the hasher that produced its hashes.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    fn equalise_timing(&self, password: &str) {
        if let Err(err) = self.hasher.hash(password) {
            debug!(error = %err, "timing equalisation hash failed");
        }
    }
}

#[async_trait]
impl CredentialVerifier for RepositoryCredentialVerifier {
    type Principal = User;

    async fn verify(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = match EmailAddress::new(credentials.email()) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.equalise_timing(credentials.password());
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        };

        match self.hasher.verify(credentials.password(), user.password_hash()) {
            Ok(true) => Ok(user),
            Ok(false) => {
                debug!(user_id = %user.id(), "login rejected: password mismatch");
                Err(Error::unauthorized(BAD_CREDENTIALS))
            }
            Err(err) => {
                warn!(user_id = %user.id(), error = %err, "stored password hash unusable");
                Err(Error::internal("stored credentials could not be verified"))
            }
        }
    }
}
