//! Service entry-point: loads configuration, prepares persistence, and serves
//! the authentication API.

mod server;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use authgate::domain::RolePolicy;
use authgate::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use authgate::outbound::tokens::jwt_secret_from_env;
use authgate::settings::{AppSettings, BuildMode};
use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn attach_database(config: ServerConfig, url: &str) -> std::io::Result<ServerConfig> {
    run_pending_migrations(url)
        .await
        .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let mode = BuildMode::from_debug_assertions();
    let secret = jwt_secret_from_env(&DefaultEnv::new(), mode).map_err(std::io::Error::other)?;

    let (roles, rejected) = RolePolicy::from_admin_emails(settings.admin_emails());
    for email in rejected {
        warn!(%email, "ignoring invalid administrator email");
    }

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(
        bind_addr,
        secret,
        settings.token_issuer(),
        settings.token_ttl().map_err(std::io::Error::other)?,
    )
    .with_roles(roles);

    if let Some(url) = settings.database_url() {
        config = attach_database(config, url).await?;
    }

    info!(%bind_addr, "starting authgate");
    create_server(config)?.await
}
