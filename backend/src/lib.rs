//! JWT authentication service library: domain model, ports, adapters and
//! HTTP surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware, re-exported for convenience.
pub use middleware::Trace;
