//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthenticationService, TokenService, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup and login use-cases.
    pub auth: Arc<dyn AuthenticationService>,
    /// Token issuance for successful logins.
    pub tokens: Arc<dyn TokenService>,
    /// User listing.
    pub users: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from the port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use authgate::domain::ports::{AuthenticationService, TokenService, UsersQuery};
    /// use authgate::inbound::http::state::HttpState;
    ///
    /// fn wire(
    ///     auth: Arc<dyn AuthenticationService>,
    ///     tokens: Arc<dyn TokenService>,
    ///     users: Arc<dyn UsersQuery>,
    /// ) -> HttpState {
    ///     HttpState::new(auth, tokens, users)
    /// }
    /// ```
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthenticationService>,
        tokens: Arc<dyn TokenService>,
        users: Arc<dyn UsersQuery>,
    ) -> Self {
        Self {
            auth,
            tokens,
            users,
        }
    }
}
