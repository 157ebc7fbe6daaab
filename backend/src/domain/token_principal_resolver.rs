//! Resolves bearer tokens to stored users for the security filter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ports::{PrincipalResolver, TokenError, TokenService, UserRepository};
use super::{EmailAddress, Error, User};

/// Message for a token whose expiry has passed.
pub const EXPIRED_TOKEN: &str = "JWT token has expired";
/// Message for a token that fails signature, issuer, or subject checks.
pub const INVALID_TOKEN: &str = "Invalid JWT token";
/// Message for a valid token whose subject no longer exists.
pub const UNKNOWN_SUBJECT: &str = "User not found";

/// [`PrincipalResolver`] backed by a token service and the user store.
///
/// The stored user is authoritative: role changes take effect on the next
/// request even though the token still carries the old role claim.
#[derive(Clone)]
pub struct TokenPrincipalResolver {
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserRepository>,
}

impl TokenPrincipalResolver {
    /// Resolver verifying with `tokens` and loading users from `users`.
    #[must_use]
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }
}

#[async_trait]
impl PrincipalResolver for TokenPrincipalResolver {
    async fn resolve(&self, bearer_token: &str) -> Result<User, Error> {
        let claims = self.tokens.verify(bearer_token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            match err {
                TokenError::Expired => Error::unauthorized(EXPIRED_TOKEN),
                TokenError::Invalid { .. } | TokenError::Issuance { .. } => {
                    Error::unauthorized(INVALID_TOKEN)
                }
            }
        })?;

        let email =
            EmailAddress::new(&claims.sub).map_err(|_| Error::unauthorized(INVALID_TOKEN))?;

        self.users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| Error::unauthorized(UNKNOWN_SUBJECT))
    }
}
