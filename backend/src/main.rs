//! Backend entry-point: loads settings, prepares persistence and serves the
//! REST API with its OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use calendar_backend::config::AppSettings;
use calendar_backend::inbound::http::health::HealthState;
use calendar_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
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

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let mut config = ServerConfig::new(settings.bind_addr()?);

    match settings.database_url.as_deref() {
        Some(database_url) => {
            let applied = run_pending_migrations(database_url)
                .await
                .wrap_err("failed to run database migrations")?;
            info!(applied, "database migrations complete");
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.pool_max_size),
            )
            .await
            .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; data is kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, settings.superuser()?).await?;
    info!("listening");
    server.await?;
    Ok(())
}
