//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::query::{is_known, radius_meters, CATALOG};
use crate::results::{Restaurant, ResultSet};
use crate::search::{CombinationMode, Coordinate, SearchCriteria, MAX_RADIUS_MILES};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Origin latitude
    pub lat: f64,
    /// Origin longitude
    pub lon: f64,
    /// Radius in miles (1..=7)
    pub radius: Option<u32>,
    /// `all` or `any`
    pub mode: Option<String>,
    /// Filter tokens (comma-separated)
    pub filters: Option<String>,
    /// `shuffled` for card-deck order
    pub order: Option<String>,
    /// Latest-wins session id
    pub session: Option<String>,
}

impl SearchParams {
    /// Validate against the catalog and build criteria
    pub fn to_criteria(&self) -> Result<SearchCriteria, ApiError> {
        let origin = Coordinate::new(self.lat, self.lon);
        if !origin.is_valid() {
            return Err(ApiError::BadRequest(format!(
                "invalid origin: {}, {}",
                self.lat, self.lon
            )));
        }

        let radius = self.radius.unwrap_or(1);
        if !(1..=MAX_RADIUS_MILES).contains(&radius) {
            return Err(ApiError::BadRequest(format!(
                "radius must be between 1 and {} miles",
                MAX_RADIUS_MILES
            )));
        }

        let mode = match self.mode.as_deref() {
            None => CombinationMode::default(),
            Some(raw) => CombinationMode::parse(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown mode: {}", raw)))?,
        };

        let mut criteria = SearchCriteria::new(origin, radius, mode);
        for token in self
            .filters
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            if !is_known(token) {
                return Err(ApiError::BadRequest(format!("unknown filter: {}", token)));
            }
            criteria.add_filter(token);
        }

        Ok(criteria)
    }
}

/// Search results response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub radius_meters: u32,
    pub mode: CombinationMode,
    pub restaurants: Vec<Restaurant>,
}

/// Handler failure, mapped to a status code
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(SearchError),
    Superseded,
    NotFound,
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Upstream(err) => {
                let status = match err {
                    SearchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (
                    status,
                    Json(json!({ "error": err.to_string(), "kind": err.kind() })),
                )
                    .into_response()
            }
            ApiError::Superseded => {
                (StatusCode::CONFLICT, Json(json!({ "superseded": true }))).into_response()
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "no restaurants found" })),
            )
                .into_response(),
        }
    }
}

/// Run the search described by `params`, through a session if one is named
async fn run_search(
    state: &AppState,
    params: &SearchParams,
) -> Result<(SearchCriteria, ResultSet), ApiError> {
    let criteria = params.to_criteria()?;

    let results = match params.session.as_deref() {
        Some(id) => state
            .session(id)
            .search(criteria.clone())
            .await
            .ok_or(ApiError::Superseded)??,
        None => state.aggregator.search(&criteria).await?,
    };

    Ok((criteria, results))
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (criteria, results) = run_search(&state, &params).await?;

    let restaurants = match params.order.as_deref() {
        Some("shuffled") => results.shuffled(),
        _ => results.into_vec(),
    };

    Ok(Json(SearchResponse {
        count: restaurants.len(),
        radius_meters: radius_meters(criteria.radius_miles),
        mode: criteria.mode,
        restaurants,
    }))
}

/// Single random pick handler
pub async fn roulette(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Restaurant>, ApiError> {
    let (_, results) = run_search(&state, &params).await?;
    results
        .random_pick()
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Filter catalog handler
pub async fn catalog() -> impl IntoResponse {
    Json(CATALOG)
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "instance": state.instance_name(),
        "version": crate::VERSION
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(radius: Option<u32>, mode: Option<&str>, filters: Option<&str>) -> SearchParams {
        SearchParams {
            lat: 40.0,
            lon: -74.0,
            radius,
            mode: mode.map(str::to_string),
            filters: filters.map(str::to_string),
            order: None,
            session: None,
        }
    }

    #[test]
    fn test_criteria_from_params() {
        let criteria = params(Some(3), Some("any"), Some("Sushi, $2,,open_now"))
            .to_criteria()
            .unwrap();

        assert_eq!(criteria.radius_miles, 3);
        assert_eq!(criteria.mode, CombinationMode::MatchAny);
        assert_eq!(criteria.filters(), ["Sushi", "$2", "open_now"]);
    }

    #[test]
    fn test_criteria_defaults() {
        let criteria = params(None, None, None).to_criteria().unwrap();
        assert_eq!(criteria.radius_miles, 1);
        assert_eq!(criteria.mode, CombinationMode::MatchAll);
        assert!(criteria.filters().is_empty());
    }

    #[test]
    fn test_criteria_rejections() {
        assert!(params(Some(8), None, None).to_criteria().is_err());
        assert!(params(Some(0), None, None).to_criteria().is_err());
        assert!(params(None, Some("most"), None).to_criteria().is_err());
        assert!(params(None, None, Some("Sushi,Moon Cheese"))
            .to_criteria()
            .is_err());

        let mut bad_origin = params(None, None, None);
        bad_origin.lat = 100.0;
        assert!(bad_origin.to_criteria().is_err());
    }
}
