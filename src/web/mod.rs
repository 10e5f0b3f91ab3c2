//! Web server module
//!
//! Exposes searches as a JSON API for the presentation layer.

mod handlers;
mod routes;
mod state;

pub use handlers::{ApiError, SearchParams, SearchResponse};
pub use routes::create_router;
pub use state::AppState;
