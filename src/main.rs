//! Starts the payroll engine HTTP server.
//!
//! Configuration is read from `PAYROLL_CONFIG_DIR` (default
//! `./config/default`). `PAYROLL_BIND_ADDR` overrides the configured bind
//! address.

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| "./config/default".to_string());
    let config = ConfigLoader::load(&config_dir).map_err(|e| {
        tracing::error!(config_dir = %config_dir, "Failed to load configuration: {e}");
        e
    })?;

    let bind_addr = std::env::var("PAYROLL_BIND_ADDR")
        .unwrap_or_else(|_| config.server().bind_addr.clone());

    let state = AppState::seeded(config).map_err(|e| {
        tracing::error!("Failed to seed repository: {e}");
        e
    })?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Payroll engine listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
