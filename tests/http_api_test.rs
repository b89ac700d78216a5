//! Integration tests for the HTTP API
//!
//! Drives the router end to end over the in-memory store and cache.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`
use userhaus::prelude::*;

struct TestApp {
    store: Arc<MemoryRecordStore>,
    cache: Arc<MemoryCache>,
    router: Router,
}

fn cached_app() -> TestApp {
    let store = Arc::new(MemoryRecordStore::new());
    let cache = Arc::new(MemoryCache::new());
    let service = CacheAsideService::new(
        store.clone(),
        CacheHandle::new(cache.clone()),
        CacheParams::default(),
    );

    TestApp {
        store,
        cache,
        router: router(Arc::new(service)),
    }
}

fn uncached_app() -> (Arc<MemoryRecordStore>, Router) {
    let store = Arc::new(MemoryRecordStore::new());
    let service = CacheAsideService::without_cache(store.clone());
    (store, router(Arc::new(service)))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn list(router: &Router, uri: &str) -> Value {
    let (status, body) = send(router, "GET", uri, None).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    serde_json::from_str(&body).expect("list body should be JSON")
}

fn error_code(body: &str) -> String {
    let value: Value = serde_json::from_str(body).expect("error body should be JSON");
    value["code"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_full_crud_scenario() {
    for router in [cached_app().router, uncached_app().1] {
        let (status, body) = send(
            &router,
            "POST",
            "/data",
            Some(json!({"name": "Ana", "email": "a@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "Record created");

        assert_eq!(
            list(&router, "/data").await,
            json!([{"id": 1, "name": "Ana", "email": "a@x.com"}])
        );

        let (status, body) = send(
            &router,
            "POST",
            "/data",
            Some(json!({"name": "Ana Again", "email": "a@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_code(&body), "CONSTRAINT_VIOLATION");

        let (status, body) = send(
            &router,
            "PUT",
            "/data/1",
            Some(json!({"name": "Ana B", "email": "a@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Record updated");
        assert_eq!(
            list(&router, "/data").await,
            json!([{"id": 1, "name": "Ana B", "email": "a@x.com"}])
        );

        let (status, body) = send(&router, "DELETE", "/data/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Record deleted");
        assert_eq!(list(&router, "/data").await, json!([]));
    }
}

#[tokio::test]
async fn test_repeated_reads_hit_store_once() {
    let app = cached_app();
    send(
        &app.router,
        "POST",
        "/data",
        Some(json!({"name": "Ana", "email": "a@x.com"})),
    )
    .await;

    let first = list(&app.router, "/data").await;
    let second = list(&app.router, "/data").await;

    assert_eq!(first, second);
    assert_eq!(app.store.list_calls(), 1);
    assert_eq!(app.cache.len(), 1);
}

#[tokio::test]
async fn test_refresh_query_bypasses_cache() {
    let app = cached_app();
    list(&app.router, "/data").await;
    list(&app.router, "/data?refresh=false").await;
    assert_eq!(app.store.list_calls(), 1);

    list(&app.router, "/data?refresh=true").await;
    assert_eq!(app.store.list_calls(), 2);
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let (store, router) = uncached_app();

    let cases = [
        json!({"name": "Ana"}),
        json!({"email": "a@x.com"}),
        json!({"name": "", "email": "a@x.com"}),
        json!({}),
    ];

    for body in cases {
        let (status, response) = send(&router, "POST", "/data", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(error_code(&response), "VALIDATION_FAILED");

        let (status, _) = send(&router, "PUT", "/data/1", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let (_, router) = uncached_app();
    let request = Request::builder()
        .method("POST")
        .uri("/data")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_integer_id_is_rejected() {
    let (_, router) = uncached_app();

    let (status, body) = send(&router, "DELETE", "/data/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_ID");
}

#[tokio::test]
async fn test_unknown_ids_are_no_ops() {
    let (_, router) = uncached_app();

    let (status, _) = send(
        &router,
        "PUT",
        "/data/42",
        Some(json!({"name": "X", "email": "x@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, "DELETE", "/data/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list(&router, "/data").await, json!([]));
}

#[tokio::test]
async fn test_store_outage_is_a_server_error() {
    let app = cached_app();
    app.store.set_unavailable(true);

    let (status, body) = send(&app.router, "GET", "/data", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&body), "DATABASE_ERROR");

    let (status, _) = send(
        &app.router,
        "POST",
        "/data",
        Some(json!({"name": "Ana", "email": "a@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_cache_outage_is_invisible_to_clients() {
    let app = cached_app();
    app.cache.simulate_outage();

    let (status, _) = send(
        &app.router,
        "POST",
        "/data",
        Some(json!({"name": "Ana", "email": "a@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list(&app.router, "/data").await.as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app.router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health, json!({"status": "ok", "cache": "disabled"}));
}

#[tokio::test]
async fn test_health_reports_store_failure() {
    let app = cached_app();

    let (status, body) = send(&app.router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["cache"], "enabled");

    app.store.set_unavailable(true);
    let (status, _) = send(&app.router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
