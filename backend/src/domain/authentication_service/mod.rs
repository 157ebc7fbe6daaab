//! Signup and login orchestration.
//!
//! Signup hashes the plaintext, assigns a role, and performs exactly one
//! durable write. Login delegates to the credential verifier and returns its
//! typed principal. Failures from collaborators propagate untouched.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{AuthenticationService, CredentialVerifier, PasswordHasher, UserRepository};
use super::{Error, LoginCredentials, NewUser, Registration, RolePolicy, User};

/// Default [`AuthenticationService`] implementation.
#[derive(Clone)]
pub struct AuthenticationServiceImpl {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    verifier: Arc<dyn CredentialVerifier<Principal = User>>,
    roles: RolePolicy,
}

impl AuthenticationServiceImpl {
    /// Wire the service to its driven ports. `roles` decides which role a
    /// new account receives.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        verifier: Arc<dyn CredentialVerifier<Principal = User>>,
        roles: RolePolicy,
    ) -> Self {
        Self {
            users,
            hasher,
            verifier,
            roles,
        }
    }
}

#[async_trait]
impl AuthenticationService for AuthenticationServiceImpl {
    async fn signup(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = self.hasher.hash(registration.password()).map_err(|err| {
            warn!(error = %err, "password hashing failed during signup");
            Error::internal("password could not be hashed")
        })?;

        let new_user = NewUser {
            full_name: registration.full_name().clone(),
            email: registration.email().clone(),
            password_hash,
            role: self.roles.role_for(registration.email()),
        };

        let user = self.users.save(new_user).await?;
        info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self.verifier.verify(credentials).await?;
        info!(user_id = %user.id(), "user authenticated");
        Ok(user)
    }
}
