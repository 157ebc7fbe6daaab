//! Driving port used by the security filter to turn a bearer token into a
//! verified user.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Turns a presented bearer token into the user it was issued to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    /// Resolve the user a bearer token was issued to.
    ///
    /// Token and lookup failures surface as `unauthorized` errors; storage
    /// outages keep their own error codes.
    async fn resolve(&self, bearer_token: &str) -> Result<User, Error>;
}
