//! User registry entry-point: loads settings, seeds the store, and serves the
//! REST API until shutdown.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, build_http_state, create_server};
use user_registry::inbound::http::health::HealthState;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load server settings: {e}")))?;
    let config = ServerConfig::from_settings(&settings).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid host {:?}: {e}", settings.host()),
        )
    })?;

    let http_state = web::Data::new(build_http_state(settings.seed_admin()).await?);
    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr(), "starting user registry");

    let server = create_server(health_state.clone(), http_state, config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    info!("all systems offline");
    result
}
