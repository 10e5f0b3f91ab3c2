//! Metrics collection module
//!
//! Tracks search volume, upstream request outcomes and result sizes.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// In-process search metrics
pub struct Metrics {
    total_searches: AtomicU64,
    upstream_requests: AtomicU64,
    superseded_searches: AtomicU64,
    restaurants_returned: AtomicU64,
    out_of_range_dropped: AtomicU64,
    /// Upstream failures keyed by error kind
    upstream_failures: RwLock<HashMap<String, u64>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            upstream_requests: AtomicU64::new(0),
            superseded_searches: AtomicU64::new(0),
            restaurants_returned: AtomicU64::new(0),
            out_of_range_dropped: AtomicU64::new(0),
            upstream_failures: RwLock::new(HashMap::new()),
        }
    }

    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_superseded(&self) {
        self.superseded_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record `count` upstream requests dispatched
    pub fn record_requests(&self, count: usize) {
        self.upstream_requests
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record a failed upstream request
    pub fn record_failure(&self, kind: &str) {
        let mut failures = self
            .upstream_failures
            .write()
            .unwrap_or_else(|e| e.into_inner());
        *failures.entry(kind.to_string()).or_insert(0) += 1;
    }

    /// Record the size of a delivered result and how many records the radius dropped
    pub fn record_results(&self, returned: usize, dropped: usize) {
        self.restaurants_returned
            .fetch_add(returned as u64, Ordering::Relaxed);
        self.out_of_range_dropped
            .fetch_add(dropped as u64, Ordering::Relaxed);
    }

    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Failure count for one error kind
    pub fn get_failures(&self, kind: &str) -> u64 {
        self.upstream_failures
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(kind)
            .copied()
            .unwrap_or(0)
    }

    /// Percentage of upstream requests that succeeded
    pub fn get_reliability(&self) -> f64 {
        let requests = self.upstream_requests.load(Ordering::Relaxed);
        if requests == 0 {
            return 100.0;
        }
        let failures: u64 = self
            .upstream_failures
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .sum();
        (requests.saturating_sub(failures) as f64 / requests as f64) * 100.0
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_searches: self.get_total_searches(),
            upstream_requests: self.upstream_requests.load(Ordering::Relaxed),
            superseded_searches: self.superseded_searches.load(Ordering::Relaxed),
            restaurants_returned: self.restaurants_returned.load(Ordering::Relaxed),
            out_of_range_dropped: self.out_of_range_dropped.load(Ordering::Relaxed),
            upstream_failures: self
                .upstream_failures
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .clone(),
            reliability: self.get_reliability(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub upstream_requests: u64,
    pub superseded_searches: u64,
    pub restaurants_returned: u64,
    pub out_of_range_dropped: u64,
    pub upstream_failures: HashMap<String, u64>,
    pub reliability: f64,
}
