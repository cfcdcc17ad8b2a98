use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use cinetrend::config::{Config, StoreBackend};
use cinetrend::models::SearchRecord;
use cinetrend::state::SharedState;
use cinetrend::store::{InMemoryStore, SearchRecordStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn memory_config() -> Config {
    let mut config = Config::default();
    config.store.backend = StoreBackend::Memory;
    config
}

fn spawn_app(store: Arc<InMemoryStore>) -> Router {
    let shared = SharedState::with_store(memory_config(), store);
    let state = cinetrend::api::create_app_state(Arc::new(shared), None);
    cinetrend::api::router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn record(id: &str, term: &str, count: i64) -> SearchRecord {
    SearchRecord {
        id: id.to_string(),
        search_term: term.to_string(),
        count,
        movie_id: 7,
        poster_url: "https://image.tmdb.org/t/p/w500/p.jpg".to_string(),
        created_at: None,
    }
}

fn post_search(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/searches")
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app(Arc::new(InMemoryStore::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
}

#[tokio::test]
async fn test_trending_lists_highest_counts() {
    let store = Arc::new(InMemoryStore::with_records(vec![
        record("a", "alien", 2),
        record("b", "blade runner", 8),
        record("c", "casablanca", 5),
    ]));
    let app = spawn_app(store);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/trending")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["search_term"], "blade runner");
    assert_eq!(entries[0]["count"], 8);
    assert_eq!(entries[2]["search_term"], "alien");
}

#[tokio::test]
async fn test_record_search_is_accepted_and_counted() {
    let store = Arc::new(InMemoryStore::new());
    let app = spawn_app(store.clone());

    let response = app
        .clone()
        .oneshot(post_search(&serde_json::json!({
            "search_term": "vertigo",
            "movie": { "id": 426, "poster_path": "/v.jpg" }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    // Recording runs in the background.
    let mut records = Vec::new();
    for _ in 0..50 {
        records = store.all().await;
        if !records.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].search_term, "vertigo");
    assert_eq!(records[0].movie_id, 426);
    assert_eq!(
        records[0].poster_url,
        "https://image.tmdb.org/t/p/w500/v.jpg"
    );
}

#[tokio::test]
async fn test_record_search_rejects_blank_term() {
    let store = Arc::new(InMemoryStore::new());
    let app = spawn_app(store.clone());

    let response = app
        .oneshot(post_search(&serde_json::json!({
            "search_term": "  ",
            "movie": { "id": 1, "poster_path": null }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_trending_is_empty_when_store_is_unreachable() {
    let mut config = Config::default();
    config.appwrite.endpoint = "http://127.0.0.1:9/v1".to_string();
    config.appwrite.project_id = "p".to_string();
    config.appwrite.database_id = "d".to_string();
    config.appwrite.collection_id = "c".to_string();
    config.appwrite.request_timeout_seconds = 2;

    let state = cinetrend::api::create_app_state_from_config(config, None).unwrap();
    let app = cinetrend::api::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/trending")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_metrics_disabled_message() {
    let app = spawn_app(Arc::new(InMemoryStore::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("Metrics not enabled"));
}

#[tokio::test]
async fn test_store_trait_object_is_shared() {
    let store = Arc::new(InMemoryStore::new());
    let shared = SharedState::with_store(memory_config(), store.clone());

    shared
        .tracker
        .record_search("rope", &cinetrend::models::Movie::new(1, None))
        .await;

    let listed = shared.store.list(&[]).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(store.len().await, 1);
}
