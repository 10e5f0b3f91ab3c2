//! Source of business records for one request spec

use crate::error::SearchError;
use crate::query::RequestSpec;
use crate::results::BusinessRecord;
use async_trait::async_trait;

/// Anything that can answer a single upstream request spec
#[async_trait]
pub trait BusinessSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str {
        "upstream"
    }

    /// Execute one spec, returning records in upstream order
    async fn fetch(&self, spec: &RequestSpec) -> Result<Vec<BusinessRecord>, SearchError>;
}
