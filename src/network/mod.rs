//! HTTP networking module
//!
//! Provides the upstream business-search client and the trait the
//! aggregator drives it through.

mod client;
mod source;

pub use client::UpstreamClient;
pub use source::BusinessSource;
