//! Application state shared across handlers

use crate::config::Settings;
use crate::metrics::Metrics;
use crate::network::{BusinessSource, UpstreamClient};
use crate::search::{SearchAggregator, SearchSession};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search executor
    pub aggregator: Arc<SearchAggregator>,
    /// Metrics shared with the aggregator
    pub metrics: Arc<Metrics>,
    /// Latest-wins sessions keyed by client-chosen id
    sessions: Arc<Mutex<SessionTable>>,
}

struct SessionEntry {
    session: Arc<SearchSession>,
    last_used: u64,
}

/// Bounded session map; the least recently used entry makes room
struct SessionTable {
    entries: HashMap<String, SessionEntry>,
    capacity: usize,
    clock: u64,
}

impl SessionTable {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    fn get_or_insert_with<F>(&mut self, id: &str, create: F) -> Arc<SearchSession>
    where
        F: FnOnce() -> SearchSession,
    {
        self.clock += 1;
        let now = self.clock;

        if let Some(entry) = self.entries.get_mut(id) {
            entry.last_used = now;
            return entry.session.clone();
        }

        if self.entries.len() >= self.capacity {
            let stalest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            if let Some(key) = stalest {
                debug!("Evicting idle session '{}'", key);
                self.entries.remove(&key);
            }
        }

        let session = Arc::new(create());
        self.entries.insert(
            id.to_string(),
            SessionEntry {
                session: session.clone(),
                last_used: now,
            },
        );
        session
    }
}

impl AppState {
    /// Create state backed by the configured upstream client
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let client = UpstreamClient::with_settings(&settings.upstream)?;
        Ok(Self::new(settings, Arc::new(client)))
    }

    /// Create state backed by an arbitrary business source
    pub fn new(settings: Settings, source: Arc<dyn BusinessSource>) -> Self {
        let metrics = Arc::new(Metrics::new());
        let aggregator = Arc::new(
            SearchAggregator::with_settings(source, &settings.search).with_metrics(metrics.clone()),
        );
        let sessions = SessionTable::new(settings.server.max_sessions);

        Self {
            settings: Arc::new(settings),
            aggregator,
            metrics,
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Session for `id`, created on first use.
    ///
    /// An evicted session keeps serving searches already holding it; the
    /// next request for that id starts a fresh one.
    pub fn session(&self, id: &str) -> Arc<SearchSession> {
        let aggregator = &self.aggregator;
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_or_insert_with(id, || SearchSession::new(aggregator.clone()))
    }

    /// Number of sessions currently held
    pub fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }
}
