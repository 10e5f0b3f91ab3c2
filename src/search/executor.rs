//! Search execution and aggregation

use super::models::SearchCriteria;
use crate::config::SearchSettings;
use crate::error::SearchError;
use crate::metrics::Metrics;
use crate::network::BusinessSource;
use crate::query::{radius_meters, QueryBuilder, RequestSpec};
use crate::results::{BusinessRecord, Restaurant, ResultSet};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Runs searches against a business source, fanning out when the
/// criteria need more than one upstream request
pub struct SearchAggregator {
    /// Upstream the specs are executed against
    source: Arc<dyn BusinessSource>,
    /// Criteria to request-spec translation
    builder: QueryBuilder,
    /// Collapse repeated ids after filtering
    dedupe_by_id: bool,
    metrics: Arc<Metrics>,
}

impl SearchAggregator {
    /// Create an aggregator with default search settings
    pub fn new(source: Arc<dyn BusinessSource>) -> Self {
        Self::with_settings(source, &SearchSettings::default())
    }

    pub fn with_settings(source: Arc<dyn BusinessSource>, settings: &SearchSettings) -> Self {
        Self {
            source,
            builder: QueryBuilder::new().with_limit(settings.result_limit),
            dedupe_by_id: settings.dedupe_by_id,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Share a metrics collector
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Enable or disable id-based dedup of merged results
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe_by_id = dedupe;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Execute a search.
    ///
    /// A single-request search returns that request's failure as the error.
    /// A fan-out search never fails: each failed request contributes no
    /// records and the union of the rest is returned.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<ResultSet, SearchError> {
        let span = info_span!("search", id = %Uuid::new_v4());
        self.execute(criteria).instrument(span).await
    }

    async fn execute(&self, criteria: &SearchCriteria) -> Result<ResultSet, SearchError> {
        let start = Instant::now();
        let specs = self.builder.build(criteria);
        let radius = radius_meters(criteria.radius_miles);

        self.metrics.inc_search();
        self.metrics.record_requests(specs.len());

        info!(
            "Executing search with {} filters ({:?}) as {} upstream requests",
            criteria.filters().len(),
            criteria.mode,
            specs.len()
        );

        let records = match specs.as_slice() {
            [spec] => self.source.fetch(spec).await.map_err(|e| {
                warn!("Search failed: {}", e);
                self.metrics.record_failure(e.kind());
                e
            })?,
            _ => {
                let responses = join_all(specs.iter().map(|spec| self.fetch_tolerant(spec))).await;
                responses.into_iter().flatten().collect()
            }
        };

        let results = self.merge(records, radius);
        debug!(
            "Search returned {} restaurants in {:?}",
            results.len(),
            start.elapsed()
        );
        Ok(results)
    }

    /// Fetch one spec of a fan-out, absorbing failure as an empty contribution
    async fn fetch_tolerant(&self, spec: &RequestSpec) -> Vec<BusinessRecord> {
        let term = spec.category_term.as_deref().unwrap_or("");
        match self.source.fetch(spec).await {
            Ok(records) => {
                debug!("Request for '{}' returned {} records", term, records.len());
                records
            }
            Err(e) => {
                warn!("Request for '{}' on {} failed: {}", term, self.source.name(), e);
                self.metrics.record_failure(e.kind());
                Vec::new()
            }
        }
    }

    /// Bound by radius and project, preserving merge order
    fn merge(&self, records: Vec<BusinessRecord>, radius_meters: u32) -> ResultSet {
        let total = records.len();
        let restaurants: Vec<Restaurant> = records
            .into_iter()
            .filter(|r| r.within(radius_meters))
            .map(Restaurant::from)
            .collect();
        let dropped = total - restaurants.len();

        let mut results = ResultSet::new(restaurants);
        if self.dedupe_by_id {
            results = results.dedup_by_id();
        }

        self.metrics.record_results(results.len(), dropped);
        results
    }
}
