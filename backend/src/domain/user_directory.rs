//! Administrative listing of registered users.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ports::{UserRepository, UsersQuery};
use super::{Error, User, UserId};

/// [`UsersQuery`] backed by the user store.
#[derive(Clone)]
pub struct UserDirectoryService {
    users: Arc<dyn UserRepository>,
}

impl UserDirectoryService {
    /// Directory over `users`.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UsersQuery for UserDirectoryService {
    async fn list_users(&self, requested_by: &UserId) -> Result<Vec<User>, Error> {
        let users = self.users.list().await?;
        debug!(requested_by = %requested_by, count = users.len(), "listed users");
        Ok(users)
    }
}
