//! Builders wiring domain services to their adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use authgate::domain::ports::{
    PasswordHasher, PrincipalResolver, TokenService, UserRepository,
};
use authgate::domain::{
    AuthenticationServiceImpl, RepositoryCredentialVerifier, TokenPrincipalResolver,
    UserDirectoryService,
};
use authgate::inbound::http::state::HttpState;
use authgate::outbound::crypto::Argon2PasswordHasher;
use authgate::outbound::persistence::{DieselUserRepository, InMemoryUserRepository};
use authgate::outbound::tokens::JwtTokenService;

use super::ServerConfig;

/// Handler state plus the resolver consumed by the security filter.
#[derive(Clone)]
pub(crate) struct AppServices {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) resolver: Arc<dyn PrincipalResolver>,
}

fn build_user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL user store");
            Arc::new(DieselUserRepository::new(pool.clone()))
        }
        None => {
            info!("no database configured; users are kept in memory");
            Arc::new(InMemoryUserRepository::default())
        }
    }
}

/// Wire every port once; the resulting handles are shared by all workers.
pub(crate) fn build_services(config: &ServerConfig) -> AppServices {
    let users = build_user_repository(config);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        &config.jwt_secret,
        config.token_issuer.clone(),
        config.token_ttl,
        clock,
    ));

    let verifier = Arc::new(RepositoryCredentialVerifier::new(
        Arc::clone(&users),
        Arc::clone(&hasher),
    ));
    let auth = Arc::new(AuthenticationServiceImpl::new(
        Arc::clone(&users),
        hasher,
        verifier,
        config.roles.clone(),
    ));
    let directory = Arc::new(UserDirectoryService::new(Arc::clone(&users)));
    let resolver = Arc::new(TokenPrincipalResolver::new(Arc::clone(&tokens), users));

    AppServices {
        http_state: web::Data::new(HttpState::new(auth, tokens, directory)),
        resolver,
    }
}
