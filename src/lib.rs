//! Foodie-RS: nearby restaurant discovery
//!
//! Turns user-selected filters, a radius and an origin coordinate into
//! business-search API requests, runs them concurrently when the filters
//! call for a union, and returns one distance-bounded result list.

pub mod config;
pub mod error;
pub mod metrics;
pub mod network;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::SearchError;
pub use query::{QueryBuilder, RequestSpec, SearchFilter};
pub use results::{Restaurant, ResultSet};
pub use search::{CombinationMode, Coordinate, SearchAggregator, SearchCriteria, SearchSession};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
