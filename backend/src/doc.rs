//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the signup, login and users endpoints from the inbound layer
//! - **Schemas**: request/response bodies plus the two error envelopes
//!   ([`Error`](crate::domain::Error) and
//!   [`ProblemDetail`](crate::inbound::http::failure::ProblemDetail))
//! - **Security**: the JWT bearer scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Role};
use crate::inbound::http::auth::{LoginRequest, LoginResponse, SignupRequest};
use crate::inbound::http::failure::ProblemDetail;
use crate::inbound::http::users::UserResponse;

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "authgate API",
        description = "Signup, password login and bearer-token protected user endpoints.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("bearer" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::list_users,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        LoginResponse,
        UserResponse,
        Role,
        Error,
        ErrorCode,
        ProblemDetail
    )),
    tags(
        (name = "auth", description = "Account creation and login"),
        (name = "users", description = "Operations related to users")
    )
)]
pub struct ApiDoc;
