//! Driving port for user-directory queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch registered users
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every registered user on behalf of `requested_by`.
    async fn list_users(&self, requested_by: &UserId) -> Result<Vec<User>, Error>;
}
