//! School portal entry-point: loads settings and secrets, prepares storage,
//! and serves the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use school_portal::inbound::http::health::HealthState;
use school_portal::inbound::http::token_config::{BuildMode, secret_settings_from_env};
use school_portal::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    info!(?settings, "settings loaded");

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let token_ttl = settings.token_ttl().map_err(std::io::Error::other)?;
    let support_contact = settings.support_contact().map_err(std::io::Error::other)?;

    let secrets = secret_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    if secrets.ephemeral {
        warn!(
            fingerprint = %secrets.token_fingerprint,
            "using ephemeral token secret; sessions will not survive a restart"
        );
    } else {
        info!(fingerprint = %secrets.token_fingerprint, "token secret loaded");
    }
    if secrets.webhook_key.is_none() {
        warn!("payment webhook key not configured; confirmations are disabled");
    }

    let mut config = ServerConfig::new(bind_addr, secrets, token_ttl, support_contact);

    if let Some(database_url) = settings.database_url() {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations applied");

        let max_size = settings.db_max_connections().map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(server::build_metrics()?));
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
