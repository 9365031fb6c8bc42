//! Backend entry-point: loads configuration, connects to PostgreSQL and
//! serves the Koders REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use koders::config::{DatabaseSettings, ServerSettings};
use koders::inbound::http::health::HealthState;
use koders::inbound::http::state::HttpState;
use koders::outbound::persistence::{DbPool, DieselKoderRepository};
use server::{ServerConfig, create_server};

/// Application bootstrap.
///
/// Exits with a non-zero status when configuration is incomplete or the
/// database cannot be reached.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database = DatabaseSettings::load_from_env().wrap_err("loading database settings")?;
    let server_settings = ServerSettings::load_from_env().wrap_err("loading server settings")?;
    let bind_addr = server_settings.bind_addr()?;

    let pool = connect(&database).await?;
    info!("database connection established");

    let http_state = HttpState::from_repository(Arc::new(DieselKoderRepository::new(pool)));
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, http_state))
        .wrap_err_with(|| format!("binding {bind_addr}"))?;
    info!(%bind_addr, "server listening");

    server.await.wrap_err("server terminated")
}

async fn connect(database: &DatabaseSettings) -> Result<DbPool> {
    let pool_config = database.pool_config().inspect_err(|err| {
        error!(error = %err, "database settings incomplete");
    })?;
    let pool = DbPool::new(pool_config).await.inspect_err(|err| {
        error!(error = %err, "failed to build database pool");
    })?;
    pool.check_connection().await.inspect_err(|err| {
        error!(error = %err, "database connection failed");
    })?;
    Ok(pool)
}
