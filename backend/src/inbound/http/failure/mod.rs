//! Structured responders for authentication and authorisation failures.
//!
//! Both responders write a problem-detail JSON body:
//!
//! ```json
//! {
//!   "type": "about:blank",
//!   "title": "Unauthorized",
//!   "status": 401,
//!   "detail": "Bad credentials",
//!   "description": "Invalid or missing token",
//!   "traceId": "3fa85f64-5717-4562-b3fc-2c963f66afa6"
//! }
//! ```
//!
//! The write is terminal: callers return the response without invoking the
//! rest of the chain. Serialisation failures surface as [`actix_web::Error`].

mod access_denied;
mod entry_point;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{ContentType, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{TRACE_ID_HEADER, TraceId};

pub use access_denied::{ACCESS_DENIED, AccessDeniedHandler};
pub use entry_point::{AuthenticationEntryPoint, FULL_AUTHENTICATION_REQUIRED};

/// Problem-detail body shared by the failure responders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetail {
    /// Problem type URI; always `about:blank`.
    #[serde(rename = "type")]
    #[schema(example = "about:blank")]
    pub problem_type: String,
    /// Reason phrase of the status.
    #[schema(example = "Unauthorized")]
    pub title: String,
    /// HTTP status code.
    #[schema(example = 401)]
    pub status: u16,
    /// Message of the failure that triggered the response.
    #[schema(example = "Bad credentials")]
    pub detail: String,
    /// Fixed, human-readable explanation for the failure category.
    #[schema(example = "Invalid or missing token")]
    pub description: String,
    /// Request trace identifier, when one is in scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl ProblemDetail {
    fn new(status: StatusCode, detail: &str, description: &str) -> Self {
        Self {
            problem_type: "about:blank".to_owned(),
            title: status.canonical_reason().unwrap_or_default().to_owned(),
            status: status.as_u16(),
            detail: detail.to_owned(),
            description: description.to_owned(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    fn with_trace_id(mut self, trace_id: Option<&str>) -> Self {
        if let Some(id) = trace_id {
            self.trace_id = Some(id.to_owned());
        }
        self
    }

    fn into_response(self, status: StatusCode) -> Result<HttpResponse, actix_web::Error> {
        let body = serde_json::to_vec(&self)?;
        let mut builder = HttpResponse::build(status);
        builder.insert_header(ContentType::json());
        if let Some(id) = self.trace_id.as_deref() {
            if let Ok(value) = HeaderValue::from_str(id) {
                builder.insert_header((HeaderName::from_static(TRACE_ID_HEADER), value));
            }
        }
        Ok(builder.body(body))
    }
}

fn respond(
    status: StatusCode,
    detail: &str,
    description: &str,
    trace_id: Option<&str>,
) -> Result<HttpResponse, actix_web::Error> {
    ProblemDetail::new(status, detail, description)
        .with_trace_id(trace_id)
        .into_response(status)
}

#[cfg(test)]
mod tests;
