//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{AppServices, build_services};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use authgate::doc::ApiDoc;
use authgate::inbound::http::auth::{login, signup};
use authgate::inbound::http::users::{current_user, list_users};
use authgate::middleware::{SecurityConfig, SecurityFilter, Trace};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

#[derive(Clone)]
struct AppDependencies {
    services: AppServices,
    security: Arc<SecurityConfig>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies { services, security } = deps;

    let api = web::scope("/api/v1")
        .service(signup)
        .service(login)
        .service(current_user)
        .service(list_users);

    let app = App::new()
        .app_data(services.http_state)
        .wrap(SecurityFilter::new(security, services.resolver))
        .wrap(Trace)
        .service(api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// The access rules are built once here and shared with every worker.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let services = build_services(&config);
    let security = Arc::new(SecurityConfig::api_defaults());
    let deps = AppDependencies { services, security };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();

    Ok(server)
}
