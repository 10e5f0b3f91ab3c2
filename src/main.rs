//! Foodie-RS: nearby restaurant discovery
//!
//! This is the main entry point for the application.

use anyhow::Result;
use foodie_rs::{
    config,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = config::load()?;

    // Initialize logging
    let level = if settings.general.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Foodie-RS v{}", foodie_rs::VERSION);
    info!("Loaded configuration for instance: {}", settings.general.instance_name);
    info!("Upstream endpoint: {}", settings.upstream.base_url);

    // Create application state
    let state = AppState::from_settings(settings.clone())?;
    info!("Application state initialized");

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
