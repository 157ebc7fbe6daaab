//! Responder for requests lacking valid authentication (401).

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use tracing::debug;

use super::respond;

/// Message used when a protected route is called without a bearer token.
pub const FULL_AUTHENTICATION_REQUIRED: &str =
    "Full authentication is required to access this resource";

/// Writes the 401 problem body.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use authgate::inbound::http::failure::AuthenticationEntryPoint;
///
/// let response = AuthenticationEntryPoint.commence("Bad credentials").unwrap();
/// assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthenticationEntryPoint;

impl AuthenticationEntryPoint {
    /// Fixed explanation written to every 401 body.
    pub const DESCRIPTION: &'static str = "Invalid or missing token";

    /// Respond to an authentication failure carrying `message`.
    ///
    /// # Errors
    ///
    /// Propagates body serialisation failures.
    pub fn commence(self, message: &str) -> Result<HttpResponse, actix_web::Error> {
        self.commence_traced(message, None)
    }

    /// As [`Self::commence`], stamping `trace_id` when the failure captured
    /// one outside the current scope.
    ///
    /// # Errors
    ///
    /// Propagates body serialisation failures.
    pub fn commence_traced(
        self,
        message: &str,
        trace_id: Option<&str>,
    ) -> Result<HttpResponse, actix_web::Error> {
        debug!(detail = message, "authentication required");
        respond(StatusCode::UNAUTHORIZED, message, Self::DESCRIPTION, trace_id)
    }
}
