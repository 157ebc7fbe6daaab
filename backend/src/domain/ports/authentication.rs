//! Driving port for signup and login use-cases.
//!
//! Inbound adapters call this port without knowing how passwords are hashed
//! or where users are stored, so handler tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Domain use-case port for account registration and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthenticationService: Send + Sync {
    /// Register a new account and return the persisted user.
    async fn signup(&self, registration: &Registration) -> Result<User, Error>;

    /// Verify credentials and return the matching user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
