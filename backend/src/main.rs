//! Backend entry-point: loads settings, migrates the schema, and serves the
//! CRM API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crm_backend::inbound::http::health::HealthState;
use crm_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use crm_backend::settings::load_settings;

use server::{ServerConfig, create_server};

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

    let settings = load_settings().map_err(std::io::Error::other)?;
    info!(settings = ?settings, "configuration loaded");

    let pool = DbPool::new(PoolConfig::new(settings.database_url.clone()))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;

    let applied = run_migrations(&settings.database_url)
        .await
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations complete");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(settings, pool)).await?;
    server.await
}
