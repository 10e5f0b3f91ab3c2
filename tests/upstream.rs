//! Aggregator tests against a mocked business-search endpoint.

use foodie_rs::config::UpstreamSettings;
use foodie_rs::network::UpstreamClient;
use foodie_rs::{CombinationMode, Coordinate, SearchAggregator, SearchCriteria, SearchError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/v3/businesses/search";

fn aggregator(server: &MockServer) -> SearchAggregator {
    let settings = UpstreamSettings {
        base_url: format!("{}{}", server.uri(), SEARCH_PATH),
        api_key: Some("test-key".to_string()),
        request_timeout: 0.5,
        ..Default::default()
    };
    let client = UpstreamClient::with_settings(&settings).expect("client should build");
    SearchAggregator::new(Arc::new(client))
}

fn criteria(mode: CombinationMode, filters: &[&str]) -> SearchCriteria {
    SearchCriteria::new(Coordinate::new(40.7128, -74.006), 5, mode)
        .with_filters(filters.iter().copied())
}

fn business(id: &str, distance: Option<f64>) -> Value {
    json!({
        "id": id,
        "name": format!("Place {}", id),
        "location": {"address1": "1 Main St", "city": "New York", "state": "NY", "zip_code": "10001"},
        "coordinates": {"latitude": 40.71, "longitude": -74.0},
        "business_hours": [],
        "categories": [{"title": "Sushi Bars", "alias": "sushi"}],
        "distance": distance,
        "transactions": ["pickup"]
    })
}

#[tokio::test]
async fn match_all_issues_one_combined_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(header("Authorization", "Bearer test-key"))
        .and(query_param("open_now", "true"))
        .and(query_param("price", "2"))
        .and(query_param("categories", "Sushi"))
        .and(query_param("term", "Sushi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "businesses": [business("a", Some(100.0)), business("far", Some(9000.0))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = assert_ok!(
        aggregator(&server)
            .search(&criteria(CombinationMode::MatchAll, &["open_now", "$2", "Sushi"]))
            .await
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results.as_slice()[0].id, "a");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("latitude=40.7128&longitude=-74.006&radius=8047&limit=50&open_now=true&price=2&categories=Sushi&term=Sushi")
    );
}

#[tokio::test]
async fn match_any_tolerates_one_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("term", "Sushi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"businesses": [business("slow", None)]}))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("term", "Tacos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "businesses": [
                business("t1", Some(10.0)),
                business("t2", Some(500.0)),
                business("t3", Some(8000.0))
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = assert_ok!(
        aggregator(&server)
            .search(&criteria(CombinationMode::MatchAny, &["Sushi", "Tacos"]))
            .await
    );

    let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["t1", "t2", "t3"]);
}

#[tokio::test]
async fn empty_filters_query_by_radius_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"businesses": []})))
        .expect(1)
        .mount(&server)
        .await;

    let results = aggregator(&server)
        .search(&criteria(CombinationMode::MatchAny, &[]))
        .await
        .expect("empty result is not an error");

    assert!(results.is_empty());

    let requests = server.received_requests().await.unwrap();
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert_eq!(keys, ["latitude", "longitude", "radius", "limit"]);
}

#[tokio::test]
async fn single_request_transport_failure_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"businesses": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = aggregator(&server)
        .search(&criteria(CombinationMode::MatchAll, &["Sushi", "Tacos"]))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::TransportFailure(_)));
}

#[tokio::test]
async fn single_request_empty_body_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = assert_err!(
        aggregator(&server)
            .search(&criteria(CombinationMode::MatchAll, &[]))
            .await
    );

    assert!(matches!(err, SearchError::EmptyResponseBody));
}

#[tokio::test]
async fn single_request_error_envelope_is_decode_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": "TOKEN_INVALID", "description": "Invalid access token"}
        })))
        .mount(&server)
        .await;

    let err = aggregator(&server)
        .search(&criteria(CombinationMode::MatchAll, &["Pizza"]))
        .await
        .unwrap_err();

    match err {
        SearchError::DecodeFailure { status, .. } => assert_eq!(status, 401),
        other => panic!("expected decode failure, got {:?}", other),
    }
}

#[tokio::test]
async fn match_any_unions_in_spec_order() {
    let server = MockServer::start().await;

    for (term, ids) in [("Vegan", ["v1", "shared"]), ("Thai", ["shared", "th1"])] {
        let businesses: Vec<Value> = ids.iter().map(|id| business(id, None)).collect();
        Mock::given(method("GET"))
            .and(query_param("categories", term))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "businesses": businesses })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let results = aggregator(&server)
        .search(&criteria(CombinationMode::MatchAny, &["Vegan", "$1", "Thai"]))
        .await
        .unwrap();

    let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["v1", "shared", "shared", "th1"]);
    assert_eq!(results.as_slice()[1], results.as_slice()[2]);
}

#[tokio::test]
async fn match_any_requests_overlap_in_time() {
    let server = MockServer::start().await;
    let terms = ["Sushi", "Tacos", "Vegan"];

    for term in terms {
        Mock::given(method("GET"))
            .and(query_param("term", term))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"businesses": [business(term, None)]}))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let start = std::time::Instant::now();
    let results = assert_ok!(
        aggregator(&server)
            .search(&criteria(CombinationMode::MatchAny, &terms))
            .await
    );
    let elapsed = start.elapsed();

    assert_eq!(results.len(), 3);
    // one after another would take at least 900ms
    assert!(elapsed < Duration::from_millis(800), "took {:?}", elapsed);
}
