//! Search criteria and related data models

use crate::query::SearchFilter;
use serde::{Deserialize, Serialize};

/// Largest radius, in miles, offered to the user
pub const MAX_RADIUS_MILES: u32 = 7;

/// Geographic origin of a search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within WGS84 bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// How multiple category filters combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationMode {
    /// Every filter must apply; one combined upstream query
    #[default]
    MatchAll,
    /// Any one filter suffices; one upstream query per category, unioned
    MatchAny,
}

impl CombinationMode {
    /// Parse the short names used on the HTTP surface (`all` / `any`)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "match_all" => Some(CombinationMode::MatchAll),
            "any" | "match_any" => Some(CombinationMode::MatchAny),
            _ => None,
        }
    }
}

/// Everything needed to run one search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Raw filter tokens, insertion ordered, no duplicates
    filters: Vec<String>,
    /// Search origin
    pub origin: Coordinate,
    /// Radius in miles (1..=7 from the UI)
    pub radius_miles: u32,
    /// Combination semantics
    pub mode: CombinationMode,
}

impl SearchCriteria {
    /// Create criteria with no filters
    pub fn new(origin: Coordinate, radius_miles: u32, mode: CombinationMode) -> Self {
        Self {
            filters: Vec::new(),
            origin,
            radius_miles,
            mode,
        }
    }

    /// Add several filter tokens; repeated tokens are kept once
    pub fn with_filters<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.add_filter(token);
        }
        self
    }

    pub fn add_filter(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !self.filters.contains(&token) {
            self.filters.push(token);
        }
    }

    /// Raw tokens in insertion order
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Tokens classified by kind, in insertion order
    pub fn classified(&self) -> impl Iterator<Item = SearchFilter> + '_ {
        self.filters.iter().map(|t| SearchFilter::classify(t))
    }
}
