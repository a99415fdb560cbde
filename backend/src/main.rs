//! Users API entry-point: loads settings, wires the store and serves HTTP.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_api::inbound::http::health::HealthState;
use users_api::settings::ServerSettings;

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

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let profiles = settings.active_profiles();
    info!(profiles = ?profiles.names(), dev = profiles.is_dev(), "settings loaded");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::from(&settings))?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
