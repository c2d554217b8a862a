mod routes;
mod singleton;
mod state;

use anyhow::{Context, Result};
use eventcal_core::EventStore;
use eventcal_core::config::EventcalConfig;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = EventcalConfig::load()?;
    let db_path = config.database_path();

    // Ensure only one instance serves this database
    let _lock = singleton::acquire_lock(&db_path)?;

    let store = EventStore::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let app = routes::app(AppState::new(store));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port in config")?;
    info!(database = %db_path.display(), "eventcal-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
