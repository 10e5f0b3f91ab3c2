//! Search orchestration module
//!
//! Turns criteria into upstream requests, executes them (concurrently when
//! there are several), and merges the responses into one result set.

mod executor;
mod models;
mod session;

pub use executor::SearchAggregator;
pub use models::*;
pub use session::SearchSession;
