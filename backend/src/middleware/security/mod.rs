//! Bearer-token security filter.
//!
//! Per request the filter looks up the route's [`Access`] level, resolves the
//! bearer token into a [`User`](crate::domain::User) through the
//! [`PrincipalResolver`] port, and checks role requirements. Rejections are
//! written by the failure responders and end the chain; accepted requests
//! carry an [`AuthenticatedUser`] in their extensions.

mod config;

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::ErrorCode;
use crate::domain::ports::PrincipalResolver;
use crate::inbound::http::failure::{
    ACCESS_DENIED, AccessDeniedHandler, AuthenticationEntryPoint, FULL_AUTHENTICATION_REQUIRED,
};
use crate::inbound::http::principal::AuthenticatedUser;

pub use config::{Access, SecurityConfig, SecurityConfigBuilder};

/// Path the router matches against.
///
/// The raw URI path may still be percent-encoded (`/users` as `/user%73`);
/// the router decodes it before matching, so rules must see the same form.
fn routed_path(req: &ServiceRequest) -> &str {
    req.match_info().as_str()
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, raw_token) = header.trim().split_once(' ')?;
    let token = raw_token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_owned())
}

/// Security middleware factory.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use authgate::domain::ports::PrincipalResolver;
/// use authgate::middleware::{SecurityConfig, SecurityFilter};
///
/// fn app(resolver: Arc<dyn PrincipalResolver>) {
///     let filter = SecurityFilter::new(Arc::new(SecurityConfig::api_defaults()), resolver);
///     let _app = App::new().wrap(filter);
/// }
/// ```
#[derive(Clone)]
pub struct SecurityFilter {
    config: Arc<SecurityConfig>,
    resolver: Arc<dyn PrincipalResolver>,
}

impl SecurityFilter {
    /// Wrap routes with `config`, resolving bearer tokens through `resolver`.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>, resolver: Arc<dyn PrincipalResolver>) -> Self {
        Self { config, resolver }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddleware {
            service: Rc::new(service),
            config: Arc::clone(&self.config),
            resolver: Arc::clone(&self.resolver),
        }))
    }
}

/// Service wrapper produced by [`SecurityFilter`].
pub struct SecurityMiddleware<S> {
    service: Rc<S>,
    config: Arc<SecurityConfig>,
    resolver: Arc<dyn PrincipalResolver>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let access = self.config.access_for(routed_path(&req));
        if access == Access::Public {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let service = Rc::clone(&self.service);
        let resolver = Arc::clone(&self.resolver);
        Box::pin(async move {
            let Some(token) = bearer_token(&req) else {
                debug!(path = req.path(), "rejecting request without bearer token");
                let response = AuthenticationEntryPoint.commence(FULL_AUTHENTICATION_REQUIRED)?;
                return Ok(req.into_response(response).map_into_right_body());
            };

            let user = match resolver.resolve(&token).await {
                Ok(user) => user,
                Err(err) => {
                    debug!(path = req.path(), code = ?err.code(), "bearer token rejected");
                    let response = if err.code() == ErrorCode::Unauthorized {
                        AuthenticationEntryPoint.commence_traced(err.message(), err.trace_id())?
                    } else {
                        err.error_response()
                    };
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            if let Access::Role(required) = access {
                if !user.role().satisfies(required) {
                    debug!(
                        path = req.path(),
                        user_id = %user.id(),
                        required = %required,
                        "principal lacks required role"
                    );
                    let response = AccessDeniedHandler.handle(ACCESS_DENIED)?;
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            req.extensions_mut().insert(AuthenticatedUser::new(user));
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}
