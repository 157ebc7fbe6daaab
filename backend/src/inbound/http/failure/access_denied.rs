//! Responder for authenticated requests lacking permission (403).

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use tracing::debug;

use super::respond;

/// Message used when the principal lacks the role a route requires.
pub const ACCESS_DENIED: &str = "Access Denied";

/// Writes the 403 problem body.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessDeniedHandler;

impl AccessDeniedHandler {
    /// Fixed explanation written to every 403 body.
    pub const DESCRIPTION: &'static str = "You are not authorized to access this resource";

    /// Respond to an authorisation failure carrying `message`.
    ///
    /// # Errors
    ///
    /// Propagates body serialisation failures.
    pub fn handle(self, message: &str) -> Result<HttpResponse, actix_web::Error> {
        self.handle_traced(message, None)
    }

    /// As [`Self::handle`] with an explicit trace identifier.
    ///
    /// # Errors
    ///
    /// Propagates body serialisation failures.
    pub fn handle_traced(
        self,
        message: &str,
        trace_id: Option<&str>,
    ) -> Result<HttpResponse, actix_web::Error> {
        debug!(detail = message, "access denied");
        respond(StatusCode::FORBIDDEN, message, Self::DESCRIPTION, trace_id)
    }
}
