//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use authgate::domain::RolePolicy;
use authgate::outbound::persistence::DbPool;
use authgate::outbound::tokens::JwtSecret;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: JwtSecret,
    pub(crate) token_issuer: String,
    pub(crate) token_ttl: Duration,
    pub(crate) roles: RolePolicy,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration with in-memory persistence and no
    /// administrators.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        jwt_secret: JwtSecret,
        token_issuer: impl Into<String>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            bind_addr,
            jwt_secret,
            token_issuer: token_issuer.into(),
            token_ttl,
            roles: RolePolicy::default(),
            db_pool: None,
        }
    }

    /// Grant the admin role on signup according to `roles`.
    #[must_use]
    pub fn with_roles(mut self, roles: RolePolicy) -> Self {
        self.roles = roles;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, users are stored in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
