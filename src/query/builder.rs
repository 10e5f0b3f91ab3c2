//! Translation of search criteria into upstream request specs

use super::filters::SearchFilter;
use crate::error::SearchError;
use crate::search::{CombinationMode, Coordinate, SearchCriteria};
use url::Url;

/// Meters in one statute mile
pub const METERS_PER_MILE: f64 = 1609.344;

/// Radius values at or above this are taken to be meters already
pub const METERS_THRESHOLD: u32 = 8;

/// Upstream page size
pub const DEFAULT_LIMIT: u32 = 50;

/// Convert a caller-supplied radius to upstream meters.
///
/// Values below [`METERS_THRESHOLD`] are miles; anything larger passes
/// through unconverted. Miles round to the nearest meter (5 -> 8047), so
/// 2 and 5 miles come out one meter above a truncating conversion
/// (3218 and 8046).
pub fn radius_meters(radius: u32) -> u32 {
    if radius < METERS_THRESHOLD {
        (f64::from(radius) * METERS_PER_MILE).round() as u32
    } else {
        radius
    }
}

/// One upstream business-search request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: u32,
    pub limit: u32,
    pub open_now: bool,
    /// Comma-joined price digits, e.g. `"1,2"`
    pub price: Option<String>,
    /// Used as both the `categories` and `term` parameters
    pub category_term: Option<String>,
}

impl RequestSpec {
    fn with_category_term(&self, term: String) -> Self {
        Self {
            category_term: Some(term),
            ..self.clone()
        }
    }

    /// Query parameters in upstream order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("radius", self.radius_meters.to_string()),
            ("limit", self.limit.to_string()),
        ];

        if self.open_now {
            pairs.push(("open_now", "true".to_string()));
        }
        if let Some(ref price) = self.price {
            pairs.push(("price", price.clone()));
        }
        if let Some(ref term) = self.category_term {
            pairs.push(("categories", term.clone()));
            pairs.push(("term", term.clone()));
        }

        pairs
    }

    /// Full upstream URL for this spec against `base`
    pub fn to_url(&self, base: &str) -> Result<Url, SearchError> {
        if !Coordinate::new(self.latitude, self.longitude).is_valid() {
            return Err(SearchError::InvalidRequest(format!(
                "origin out of range: {}, {}",
                self.latitude, self.longitude
            )));
        }
        if self.radius_meters == 0 {
            return Err(SearchError::InvalidRequest("radius must be positive".into()));
        }

        let mut url = Url::parse(base)
            .map_err(|e| SearchError::InvalidRequest(format!("bad upstream URL '{}': {}", base, e)))?;
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        Ok(url)
    }
}

/// Builds upstream request specs from criteria
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    limit: u32,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }

    /// Override the upstream page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Produce the ordered request specs for `criteria`.
    ///
    /// `MatchAll` always yields one spec. `MatchAny` yields one spec per
    /// category token, or the single base spec when there are none.
    pub fn build(&self, criteria: &SearchCriteria) -> Vec<RequestSpec> {
        let mut prices = Vec::new();
        let mut open_now = false;
        let mut categories = Vec::new();

        for filter in criteria.classified() {
            match filter {
                SearchFilter::Price(digits) => prices.push(digits),
                SearchFilter::OpenNow => open_now = true,
                SearchFilter::Category(token) => categories.push(token),
            }
        }

        let base = RequestSpec {
            latitude: criteria.origin.latitude,
            longitude: criteria.origin.longitude,
            radius_meters: radius_meters(criteria.radius_miles),
            limit: self.limit,
            open_now,
            price: (!prices.is_empty()).then(|| prices.join(",")),
            category_term: None,
        };

        if categories.is_empty() {
            return vec![base];
        }

        match criteria.mode {
            CombinationMode::MatchAll => vec![base.with_category_term(categories.join(","))],
            CombinationMode::MatchAny => categories
                .into_iter()
                .map(|token| base.with_category_term(token))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(mode: CombinationMode, filters: &[&str]) -> SearchCriteria {
        SearchCriteria::new(Coordinate::new(40.7128, -74.006), 5, mode)
            .with_filters(filters.iter().copied())
    }

    #[test]
    fn test_radius_conversion() {
        assert_eq!(radius_meters(5), 8047);
        assert_eq!(radius_meters(1), 1609);
        assert_eq!(radius_meters(2), 3219);
        assert_eq!(radius_meters(7), 11265);
        // at the threshold the value is taken as meters
        assert_eq!(radius_meters(8), 8);
        assert_eq!(radius_meters(4000), 4000);
    }

    #[test]
    fn test_match_all_single_spec() {
        let builder = QueryBuilder::new();
        let filter_sets: [&[&str]; 3] = [
            &[],
            &["Sushi"],
            &["Sushi", "Tacos", "Vegan", "$1", "open_now"],
        ];
        for filters in filter_sets {
            let specs = builder.build(&criteria(CombinationMode::MatchAll, filters));
            assert_eq!(specs.len(), 1);
        }
    }

    #[test]
    fn test_match_any_one_spec_per_category() {
        let builder = QueryBuilder::new();

        let specs = builder.build(&criteria(
            CombinationMode::MatchAny,
            &["Sushi", "$2", "Tacos", "open_now", "Vegan"],
        ));
        assert_eq!(specs.len(), 3);
        let terms: Vec<_> = specs
            .iter()
            .map(|s| s.category_term.as_deref().unwrap())
            .collect();
        assert_eq!(terms, ["Sushi", "Tacos", "Vegan"]);
        assert!(specs.iter().all(|s| s.open_now && s.price.as_deref() == Some("2")));

        let specs = builder.build(&criteria(CombinationMode::MatchAny, &["$1", "open_now"]));
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].category_term, None);
    }

    #[test]
    fn test_match_all_query_string() {
        let spec = QueryBuilder::new()
            .build(&criteria(CombinationMode::MatchAll, &["open_now", "$2", "Sushi"]))
            .remove(0);
        let url = spec.to_url("https://api.yelp.com/v3/businesses/search").unwrap();

        assert_eq!(
            url.query(),
            Some("latitude=40.7128&longitude=-74.006&radius=8047&limit=50&open_now=true&price=2&categories=Sushi&term=Sushi")
        );
    }

    #[test]
    fn test_match_all_joins_categories() {
        let spec = QueryBuilder::new()
            .build(&criteria(CombinationMode::MatchAll, &["Sushi", "$1", "Tacos", "$3"]))
            .remove(0);

        assert_eq!(spec.category_term.as_deref(), Some("Sushi,Tacos"));
        assert_eq!(spec.price.as_deref(), Some("1,3"));
        assert!(!spec.open_now);
    }

    #[test]
    fn test_empty_filters_base_only() {
        let spec = QueryBuilder::new()
            .with_limit(20)
            .build(&criteria(CombinationMode::MatchAny, &[]))
            .remove(0);
        let keys: Vec<_> = spec.query_pairs().into_iter().map(|(k, _)| k).collect();

        assert_eq!(keys, ["latitude", "longitude", "radius", "limit"]);
        assert_eq!(spec.limit, 20);
    }

    #[test]
    fn test_invalid_url_inputs() {
        let mut spec = QueryBuilder::new()
            .build(&criteria(CombinationMode::MatchAll, &[]))
            .remove(0);
        assert!(matches!(
            spec.to_url("not a url"),
            Err(SearchError::InvalidRequest(_))
        ));

        spec.latitude = 123.0;
        assert!(matches!(
            spec.to_url("https://api.yelp.com/v3/businesses/search"),
            Err(SearchError::InvalidRequest(_))
        ));

        spec.latitude = 40.0;
        spec.longitude = f64::NAN;
        assert!(matches!(
            spec.to_url("https://api.yelp.com/v3/businesses/search"),
            Err(SearchError::InvalidRequest(_))
        ));
    }
}
