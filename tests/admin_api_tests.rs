//! Integration Tests for the Admin API
//!
//! Tests full request/response cycle for each administration endpoint against
//! an in-memory-backed router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cachefront::api::{create_admin_router, AppState};
use cachefront::cache::CacheClient;
use cachefront::store::MemoryBackend;
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, CacheClient) {
    let cache = CacheClient::with_backend(Arc::new(MemoryBackend::new()));
    let app = create_admin_router(AppState::new(cache.clone()));
    (app, cache)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == Keys Endpoint Tests ==

#[tokio::test]
async fn test_keys_listing_with_ttls() {
    let (app, cache) = create_test_app();
    cache.set("cache:/listings", "{}", Some(120)).await;
    cache.set("cache:/agents", "{}", None).await;

    let response = app.oneshot(get("/keys")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);

    let keys = json["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 2);
    for entry in keys {
        assert!(entry.get("key").is_some());
        assert!(entry.get("ttl").is_some());
    }
}

#[tokio::test]
async fn test_keys_listing_pattern_filter() {
    let (app, cache) = create_test_app();
    cache.set("cache:/listings", "{}", None).await;
    cache.set("session:abc", "{}", None).await;

    let response = app.oneshot(get("/keys?pattern=cache:*")).await.unwrap();
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["count"], 1);
    assert_eq!(json["keys"][0]["key"], "cache:/listings");
}

#[tokio::test]
async fn test_keys_listing_empty_pattern_is_bad_request() {
    let (app, _cache) = create_test_app();

    let response = app.oneshot(get("/keys?pattern=")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
    assert!(json.get("message").is_some());
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_hit_rate_seventy_percent() {
    let (app, cache) = create_test_app();
    cache.set("k", "v", None).await;

    for _ in 0..7 {
        cache.get("k").await;
    }
    for _ in 0..3 {
        cache.get("absent").await;
    }

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["stats"]["hits"], 7);
    assert_eq!(json["stats"]["misses"], 3);
    assert_eq!(json["stats"]["hitRate"], "70.00");
    assert_eq!(json["stats"]["totalKeys"], 1);
}

#[tokio::test]
async fn test_stats_zeroed_when_store_disabled() {
    let app = create_admin_router(AppState::new(CacheClient::disabled()));

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["stats"]["totalKeys"], 0);
    assert_eq!(json["stats"]["hitRate"], "0.00");
    assert_eq!(json["stats"]["memoryUsed"], "N/A");
}

// == Key Detail Endpoint Tests ==

#[tokio::test]
async fn test_key_details_success() {
    let (app, cache) = create_test_app();
    cache.set("cache:/listings", r#"{"total":2}"#, Some(300)).await;

    // Key contains a slash, so the path segment must be percent-encoded
    let response = app
        .oneshot(get("/key/cache%3A%2Flistings"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["details"]["key"], "cache:/listings");
    assert_eq!(json["details"]["value"], r#"{"total":2}"#);
    assert_eq!(json["details"]["type"], "string");
    assert_eq!(json["details"]["size"], r#"{"total":2}"#.len());
    assert!(json["details"]["ttl"].as_str().unwrap().ends_with('s'));
}

#[tokio::test]
async fn test_key_details_not_found() {
    let (app, _cache) = create_test_app();

    let response = app.oneshot(get("/key/nonexistent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Key not found");
}

// == Delete Endpoint Tests ==

#[tokio::test]
async fn test_delete_key_then_missing() {
    let (app, cache) = create_test_app();
    cache.set("cache:/listings", "{}", None).await;

    let response = app
        .clone()
        .oneshot(delete("/key/cache%3A%2Flistings"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert!(json["message"].as_str().unwrap().contains("cache:/listings"));

    let lookup = app.oneshot(get("/key/cache%3A%2Flistings")).await.unwrap();
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_key_still_succeeds() {
    let (app, _cache) = create_test_app();

    let first = app.clone().oneshot(delete("/key/ghost")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.oneshot(delete("/key/ghost")).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
}

// == Clear Endpoint Tests ==

#[tokio::test]
async fn test_clear_then_keys_empty() {
    let (app, cache) = create_test_app();
    cache.set("cache:/a", "{}", None).await;
    cache.set("cache:/b", "{}", None).await;
    cache.set("session:xyz", "{}", None).await;

    let response = app.clone().oneshot(delete("/clear")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);

    // Clear is unscoped: every key in the namespace is gone
    let listing = app.oneshot(get("/keys")).await.unwrap();
    let json = body_to_json(listing.into_body()).await;
    assert_eq!(json["count"], 0);
}
