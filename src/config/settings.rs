//! Settings structures for Foodie-RS configuration

use crate::query::DEFAULT_LIMIT;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Yelp Fusion business-search endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.yelp.com/v3/businesses/search";

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub search: SearchSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (FOODIE_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable lookup
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FOODIE_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("FOODIE_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("FOODIE_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("FOODIE_MAX_SESSIONS") {
            if let Ok(max) = val.parse() {
                self.server.max_sessions = max;
            }
        }
        if let Some(val) = lookup("FOODIE_API_KEY").or_else(|| lookup("YELP_API_KEY")) {
            self.upstream.api_key = Some(val);
        }
        if let Some(val) = lookup("FOODIE_UPSTREAM_URL") {
            self.upstream.base_url = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by /health
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Foodie".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Most client sessions held at once; the least recently used is evicted
    pub max_sessions: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
            max_sessions: 1024,
        }
    }
}

/// Upstream business-search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    /// Search endpoint URL
    pub base_url: String,
    /// Bearer credential
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Idle connections kept per host
    pub pool_maxsize: usize,
    /// User agent sent upstream
    pub user_agent: String,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            api_key: None,
            request_timeout: 30.0,
            pool_maxsize: 20,
            user_agent: format!("foodie-rs/{}", crate::VERSION),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Upstream page size
    pub result_limit: u32,
    /// Collapse repeated business ids across fan-out responses
    pub dedupe_by_id: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_LIMIT,
            dedupe_by_id: false,
        }
    }
}
