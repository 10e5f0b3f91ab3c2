//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Search routes
        .route("/search", get(handlers::search))
        .route("/roulette", get(handlers::roulette))
        .route("/catalog", get(handlers::catalog))
        // API routes
        .route("/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(CompressionLayer::new())
        .layer(cors)
        // Add state
        .with_state(state)
}
