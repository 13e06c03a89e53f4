use crate::api::AppState;
use crate::app_config::AppConfig;
use crate::mosque_loader::load_mosques_from;
use tracing::info;

mod api;
mod app_config;
mod auth;
mod domain;
mod extensions;
mod geo_engine;
mod mosque_loader;
mod prayer_times;
mod repository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let mosques = load_mosques_from(config.maps().directory(), "json").await?;
    info!("✅  Loaded {} mosque(s)", mosques.len());

    let state = AppState::from_config(&config, mosques).await;
    info!("✅  Registered {} user(s)", config.users().len());

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));
    api::serve(config.server(), state).await?;

    Ok(())
}
