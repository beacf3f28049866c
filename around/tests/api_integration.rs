//! Integration tests for the around HTTP handlers.
//!
//! These tests use the real handlers, bootstrap and content filter, with an
//! in-memory document store standing in for OpenSearch.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::{to_bytes, Bytes};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;

use around::server::handlers::{post_handler, search_handler};
use around::server::AppState;
use around::{Dependencies, ServiceConfig};
use around_repository::{IndexPostRequest, PostStoreProvider, PostStoreService, StoreError};
use around_shared::{GeoQuery, Location, Post, SearchOutcome};

const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance in kilometres.
fn haversine_km(a: Location, b: Location) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Read a unit-suffixed distance the way the search engine does, rejecting
/// anything that is not strictly positive.
fn engine_distance_km(distance: &str) -> Result<f64, StoreError> {
    let (value, scale) = if let Some(mm) = distance.strip_suffix("mm") {
        (mm, 1e-6)
    } else if let Some(km) = distance.strip_suffix("km") {
        (km, 1.0)
    } else {
        return Err(StoreError::validation(format!("unknown unit in '{}'", distance)));
    };

    let km = value
        .parse::<f64>()
        .map_err(|e| StoreError::validation(e.to_string()))?
        * scale;
    if km <= 0.0 {
        return Err(StoreError::validation(format!(
            "distance must be greater than 0, got '{}'",
            distance
        )));
    }
    Ok(km)
}

// In-memory store answering geo queries in insertion order. Like the engine's
// strict geo validation, it rejects out-of-range centers and non-positive
// distances.
struct InMemoryStore {
    exists: AtomicBool,
    create_calls: AtomicUsize,
    docs: Mutex<Vec<IndexPostRequest>>,
    failure: Option<StoreError>,
}

impl InMemoryStore {
    fn new() -> Self {
        Self {
            exists: AtomicBool::new(false),
            create_calls: AtomicUsize::new(0),
            docs: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    fn failing(error: StoreError) -> Self {
        Self {
            exists: AtomicBool::new(true),
            failure: Some(error),
            ..Self::new()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl PostStoreProvider for InMemoryStore {
    async fn index_exists(&self) -> Result<bool, StoreError> {
        Ok(self.exists.load(Ordering::SeqCst))
    }

    async fn create_index(&self) -> Result<(), StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.exists.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn index_post(&self, request: &IndexPostRequest) -> Result<(), StoreError> {
        self.check()?;
        self.docs.lock().await.push(request.clone());
        Ok(())
    }

    async fn search_nearby(&self, query: &GeoQuery) -> Result<SearchOutcome, StoreError> {
        self.check()?;
        let center = query.center;
        if !(-90.0..=90.0).contains(&center.lat) || !(-180.0..=180.0).contains(&center.lon) {
            return Err(StoreError::validation(format!(
                "illegal center [{}, {}]",
                center.lat, center.lon
            )));
        }
        let radius_km = engine_distance_km(&query.distance())?;

        let posts: Vec<Post> = self
            .docs
            .lock()
            .await
            .iter()
            .filter(|doc| haversine_km(center, doc.post.location) <= radius_km)
            .map(|doc| doc.post.clone())
            .collect();
        let total = posts.len() as u64;
        Ok(SearchOutcome::new(posts, total, 1))
    }
}

fn state_for(store: Arc<InMemoryStore>) -> AppState {
    AppState {
        store: PostStoreService::new(store),
        default_distance_km: 200.0,
    }
}

fn post_body(user: &str, message: &str, lat: f64, lon: f64) -> Bytes {
    Bytes::from(
        serde_json::json!({
            "user": user,
            "message": message,
            "location": {"lat": lat, "lon": lon}
        })
        .to_string(),
    )
}

type SearchQuery = Query<Vec<(String, String)>>;

fn search_params(lat: &str, lon: &str, range: Option<&str>) -> SearchQuery {
    let mut pairs = vec![
        ("lat".to_string(), lat.to_string()),
        ("lon".to_string(), lon.to_string()),
    ];
    if let Some(range) = range {
        pairs.push(("range".to_string(), range.to_string()));
    }
    Query(pairs)
}

fn search_uri(uri: &'static str) -> SearchQuery {
    Query::try_from_uri(&Uri::from_static(uri)).unwrap()
}

async fn submit(state: &AppState, body: Bytes) -> Response {
    post_handler(State(state.clone()), body).await.into_response()
}

async fn search(state: &AppState, params: SearchQuery) -> Response {
    search_handler(State(state.clone()), params).await.into_response()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn search_posts(state: &AppState, params: SearchQuery) -> Vec<Post> {
    let response = search(state, params).await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_post_then_search_round_trip() {
    let state = state_for(Arc::new(InMemoryStore::new()));

    let response = submit(&state, post_body("alice", "hello world", 37.0, -122.0)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Post received: hello world\n");

    let posts = search_posts(&state, search_params("37.0", "-122.0", Some("10"))).await;
    assert_eq!(
        posts,
        vec![Post::new("alice", "hello world", Location::new(37.0, -122.0))]
    );
}

#[tokio::test]
async fn test_round_trip_with_zero_radius() {
    let state = state_for(Arc::new(InMemoryStore::new()));
    submit(&state, post_body("carol", "right here", 12.5, 45.25)).await;

    let posts = search_posts(&state, search_params("12.5", "45.25", Some("0"))).await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author, "carol");
}

#[tokio::test]
async fn test_search_response_headers_and_shape() {
    let state = state_for(Arc::new(InMemoryStore::new()));
    submit(&state, post_body("alice", "hello world", 37.0, -122.0)).await;

    let response = search(&state, search_params("37.0", "-122.0", Some("10"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let item = &json.as_array().unwrap()[0];
    assert_eq!(item["user"], "alice");
    assert_eq!(item["message"], "hello world");
    assert_eq!(item["location"]["lat"], 37.0);
    assert!(item.get("id").is_none());
}

#[tokio::test]
async fn test_denylisted_posts_are_excluded() {
    let state = state_for(Arc::new(InMemoryStore::new()));
    submit(&state, post_body("alice", "hello world", 37.0, -122.0)).await;
    submit(
        &state,
        post_body("bob", "check out this 100 deals!!!", 37.0, -122.0),
    )
    .await;
    submit(&state, post_body("dave", "what the fuck", 37.0, -122.0)).await;

    let posts = search_posts(&state, search_params("37.0", "-122.0", Some("10"))).await;
    let authors: Vec<&str> = posts.iter().map(|p| p.author.as_str()).collect();
    assert_eq!(authors, vec!["alice"]);
}

#[tokio::test]
async fn test_empty_result_is_empty_array() {
    let state = state_for(Arc::new(InMemoryStore::new()));

    let response = search(&state, search_params("0", "0", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");
}

#[tokio::test]
async fn test_default_radius() {
    let state = state_for(Arc::new(InMemoryStore::new()));
    // ~145 km north of the search center
    submit(&state, post_body("near", "close by", 38.3, -122.0)).await;
    // ~510 km north of the search center
    submit(&state, post_body("far", "far away", 41.6, -122.0)).await;

    let posts = search_posts(&state, search_params("37.0", "-122.0", None)).await;
    let authors: Vec<&str> = posts.iter().map(|p| p.author.as_str()).collect();
    assert_eq!(authors, vec!["near"]);
}

#[tokio::test]
async fn test_radius_monotonicity() {
    let state = state_for(Arc::new(InMemoryStore::new()));
    for (i, lat) in [37.0, 37.2, 37.5, 38.0, 39.0, 40.0].iter().enumerate() {
        submit(&state, post_body(&format!("user{}", i), "hi", *lat, -122.0)).await;
    }

    let radii = ["0", "10", "50", "120", "250", "400"];
    let mut previous: Vec<Post> = Vec::new();
    for range in radii {
        let current = search_posts(&state, search_params("37.0", "-122.0", Some(range))).await;
        for post in &previous {
            assert!(
                current.contains(post),
                "{:?} missing at range {}",
                post,
                range
            );
        }
        assert!(current.len() >= previous.len());
        previous = current;
    }
    assert_eq!(previous.len(), 6);
}

#[tokio::test]
async fn test_missing_coordinates_default_to_origin() {
    let state = state_for(Arc::new(InMemoryStore::new()));
    submit(&state, post_body("origin", "null island", 0.0, 0.0)).await;
    submit(&state, post_body("elsewhere", "hello", 37.0, -122.0)).await;

    let posts = search_posts(&state, Query(Vec::new())).await;
    let authors: Vec<&str> = posts.iter().map(|p| p.author.as_str()).collect();
    assert_eq!(authors, vec!["origin"]);

    let posts = search_posts(&state, search_params("abc", "xyz", Some("1"))).await;
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn test_repeated_query_keys_use_first_value() {
    let state = state_for(Arc::new(InMemoryStore::new()));
    submit(&state, post_body("alice", "hello world", 37.0, -122.0)).await;

    let posts = search_posts(
        &state,
        search_uri("/search?lat=37.0&lat=38.0&lon=-122.0&range=10"),
    )
    .await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author, "alice");

    let posts = search_posts(
        &state,
        search_uri("/search?lat=37.0&lon=-122.0&range=10&range=-1"),
    )
    .await;
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn test_out_of_range_center_is_bad_request() {
    let state = state_for(Arc::new(InMemoryStore::new()));
    submit(&state, post_body("alice", "hello world", 37.0, -122.0)).await;

    let response = search(&state, search_params("123.0", "0", Some("10"))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "error");

    let posts = search_posts(&state, search_params("37.0", "-122.0", Some("10"))).await;
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn test_invalid_range_is_bad_request() {
    let state = state_for(Arc::new(InMemoryStore::new()));

    for range in ["ten", "-5"] {
        let response = search(&state, search_params("37.0", "-122.0", Some(range))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_malformed_post_is_bad_request_and_service_continues() {
    let store = Arc::new(InMemoryStore::new());
    let state = state_for(store.clone());

    let bad_bodies = [
        Bytes::from_static(b"not json"),
        Bytes::from_static(br#"{"user": "alice"}"#),
        Bytes::from_static(br#"{"user": "alice", "message": "hi", "location": {"lat": "x", "lon": 0}}"#),
        Bytes::new(),
    ];
    for body in bad_bodies {
        let response = submit(&state, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "error");
    }
    assert!(store.docs.lock().await.is_empty());

    let response = submit(&state, post_body("alice", "still up", 1.0, 1.0)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_each_post_gets_a_fresh_id() {
    let store = Arc::new(InMemoryStore::new());
    let state = state_for(store.clone());

    submit(&state, post_body("alice", "same", 1.0, 1.0)).await;
    submit(&state, post_body("alice", "same", 1.0, 1.0)).await;

    let docs = store.docs.lock().await;
    assert_eq!(docs.len(), 2);
    assert_ne!(docs[0].id, docs[1].id);
}

#[tokio::test]
async fn test_store_failures_map_to_gateway_errors() {
    let state = state_for(Arc::new(InMemoryStore::failing(StoreError::index(
        "cluster read-only",
    ))));
    let response = submit(&state, post_body("alice", "hi", 0.0, 0.0)).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let response = search(&state, search_params("0", "0", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let state = state_for(Arc::new(InMemoryStore::failing(StoreError::timeout(
        "request timed out",
    ))));
    let response = search(&state, search_params("0", "0", None)).await;
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let store = Arc::new(InMemoryStore::new());

    Dependencies::with_provider(ServiceConfig::default(), store.clone())
        .await
        .unwrap();
    assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);

    Dependencies::with_provider(ServiceConfig::default(), store.clone())
        .await
        .unwrap();
    Dependencies::with_provider(ServiceConfig::default(), store.clone())
        .await
        .unwrap();
    assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bootstrap_failure_is_fatal() {
    struct Unreachable;

    #[async_trait::async_trait]
    impl PostStoreProvider for Unreachable {
        async fn index_exists(&self) -> Result<bool, StoreError> {
            Err(StoreError::connection("connection refused"))
        }

        async fn create_index(&self) -> Result<(), StoreError> {
            unreachable!("creation must not be attempted")
        }

        async fn index_post(&self, _request: &IndexPostRequest) -> Result<(), StoreError> {
            unreachable!()
        }

        async fn search_nearby(&self, _query: &GeoQuery) -> Result<SearchOutcome, StoreError> {
            unreachable!()
        }
    }

    let result = Dependencies::with_provider(ServiceConfig::default(), Arc::new(Unreachable)).await;
    assert!(matches!(
        result,
        Err(around::ServiceError::BootstrapError(StoreError::ConnectionError(_)))
    ));
}
