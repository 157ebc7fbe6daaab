//! Extractor exposing the user resolved by the security filter.

use std::future::{Ready, ready};
use std::ops::Deref;

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};

use super::failure::FULL_AUTHENTICATION_REQUIRED;
use crate::domain::{Error, User};

/// Verified principal stored in request extensions by
/// [`crate::middleware::SecurityFilter`].
///
/// Handlers that take this extractor can only run for requests that passed
/// authentication. When the filter did not run (or the route is public) the
/// extractor fails with a 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    /// Mark `user` as verified for the current request.
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self(user)
    }

    /// Owned user.
    #[must_use]
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req.extensions().get::<Self>().cloned();
        ready(principal.ok_or_else(|| Error::unauthorized(FULL_AUTHENTICATION_REQUIRED)))
    }
}
