//! Admin API Handlers
//!
//! One handler per administrative operation. All store access goes through the
//! failure-absorbing `CacheClient`, so handlers only fail on invalid operator
//! input or a genuinely absent key.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::CacheClient;
use crate::error::{AdminError, AdminResult};
use crate::models::{
    ActionReport, DetailsEnvelope, HealthResponse, KeyWithTtl, KeysListing, KeysQuery,
    StatsEnvelope,
};

/// Application state shared across all admin handlers.
#[derive(Clone)]
pub struct AppState {
    /// Injected cache adapter; the same instance the middleware uses
    pub cache: CacheClient,
}

impl AppState {
    /// Creates a new AppState over the given cache client.
    pub fn new(cache: CacheClient) -> Self {
        Self { cache }
    }
}

/// Handler for GET /keys
///
/// Lists keys matching the optional glob pattern, with each key's remaining
/// TTL resolved individually.
pub async fn list_keys_handler(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> AdminResult<Json<KeysListing>> {
    if let Some(error_msg) = query.validate() {
        return Err(AdminError::InvalidRequest(error_msg));
    }

    let keys = state.cache.list_keys(query.pattern_or_default()).await;

    let mut listed = Vec::with_capacity(keys.len());
    for key in keys {
        let ttl = state.cache.key_ttl(&key).await;
        listed.push(KeyWithTtl {
            ttl: ttl.to_string(),
            key,
        });
    }

    Ok(Json(KeysListing::new(listed)))
}

/// Handler for GET /stats
///
/// Point-in-time statistics snapshot; zeroed when the store is unreachable.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsEnvelope> {
    let stats = state.cache.stats().await;
    Json(StatsEnvelope::new(stats))
}

/// Handler for GET /key/:key
///
/// Full details of one entry. The path segment is percent-decoded by the
/// router, so encoded slashes in cache keys round-trip correctly. An absent
/// key is an expected outcome, reported as 404 rather than a failure.
pub async fn key_details_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AdminResult<Json<DetailsEnvelope>> {
    match state.cache.entry_details(&key).await {
        Some(details) => Ok(Json(DetailsEnvelope::new(details))),
        None => Err(AdminError::KeyNotFound),
    }
}

/// Handler for DELETE /key/:key
///
/// Idempotent: reports success whether or not the key existed.
pub async fn delete_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ActionReport> {
    state.cache.delete(&key).await;
    Json(ActionReport::deleted(&key))
}

/// Handler for DELETE /clear
///
/// Flushes the store's entire active namespace in one irreversible operation.
/// Confirmation logic belongs to the calling UI, not this layer.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ActionReport> {
    state.cache.clear_all().await;
    Json(ActionReport::cleared())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState::new(CacheClient::with_backend(Arc::new(MemoryBackend::new())))
    }

    #[tokio::test]
    async fn test_list_keys_with_ttl() {
        let state = test_state();
        state.cache.set("cache:/listings", "{}", Some(60)).await;
        state.cache.set("cache:/agents", "{}", None).await;

        let result = list_keys_handler(State(state), Query(KeysQuery::default())).await;
        let listing = result.unwrap();

        assert_eq!(listing.count, 2);
        let ttls: Vec<&str> = listing.keys.iter().map(|k| k.ttl.as_str()).collect();
        assert!(ttls.contains(&"No expiration"));
    }

    #[tokio::test]
    async fn test_list_keys_rejects_empty_pattern() {
        let state = test_state();
        let query = KeysQuery {
            pattern: Some(String::new()),
        };

        let result = list_keys_handler(State(state), Query(query)).await;
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_key_details_found_and_missing() {
        let state = test_state();
        state.cache.set("cache:/listings", r#"{"total":2}"#, Some(60)).await;

        let found =
            key_details_handler(State(state.clone()), Path("cache:/listings".to_string())).await;
        assert!(found.is_ok());

        let missing = key_details_handler(State(state), Path("missing".to_string())).await;
        assert!(matches!(missing, Err(AdminError::KeyNotFound)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let state = test_state();
        state.cache.set("cache:/listings", "{}", None).await;

        let first =
            delete_key_handler(State(state.clone()), Path("cache:/listings".to_string())).await;
        assert!(first.success);

        let second =
            delete_key_handler(State(state), Path("cache:/listings".to_string())).await;
        assert!(second.success);
    }

    #[tokio::test]
    async fn test_clear_then_empty_listing() {
        let state = test_state();
        state.cache.set("cache:/a", "{}", None).await;
        state.cache.set("cache:/b", "{}", None).await;

        let report = clear_handler(State(state.clone())).await;
        assert!(report.success);

        let listing = list_keys_handler(State(state), Query(KeysQuery::default()))
            .await
            .unwrap();
        assert_eq!(listing.count, 0);
    }

    #[tokio::test]
    async fn test_stats_handler_zeroed_on_disabled_store() {
        let state = AppState::new(CacheClient::disabled());

        let envelope = stats_handler(State(state)).await;
        assert!(envelope.success);
        assert_eq!(envelope.stats.total_keys, 0);
        assert_eq!(envelope.stats.hit_rate, "0.00");
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
