//! Latest-search-wins delivery

use super::executor::SearchAggregator;
use super::models::SearchCriteria;
use crate::error::SearchError;
use crate::results::ResultSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Serializes result delivery for one consumer.
///
/// Every call to [`SearchSession::search`] supersedes the ones started
/// before it. A superseded search still runs to completion, but its result
/// is discarded so that results never arrive out of order.
pub struct SearchSession {
    aggregator: Arc<SearchAggregator>,
    generation: AtomicU64,
}

impl SearchSession {
    pub fn new(aggregator: Arc<SearchAggregator>) -> Self {
        Self {
            aggregator,
            generation: AtomicU64::new(0),
        }
    }

    /// Run a search; `None` when a newer search started meanwhile
    pub async fn search(
        &self,
        criteria: SearchCriteria,
    ) -> Option<Result<ResultSet, SearchError>> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.aggregator.search(&criteria).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("Discarding result of superseded search #{}", ticket);
            self.aggregator.metrics().inc_superseded();
            return None;
        }
        Some(result)
    }

    /// Number of searches started so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
