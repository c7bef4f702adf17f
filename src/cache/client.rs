//! Cache Client Adapter
//!
//! Failure-absorbing facade over a `StoreBackend`. Every store error is caught
//! here and converted into a "cache unavailable" value (miss, empty list,
//! zeroed stats) so an infrastructure outage can never surface on the primary
//! request path. Only `connect` propagates, so the caller can decide to run
//! degraded instead of crashing.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::cache::CacheStats;
use crate::error::StoreResult;
use crate::store::{DisabledBackend, KeyTtl, RedisBackend, StoreBackend};

// == Entry Details ==
/// Full introspection of a single cache entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryDetails {
    /// The entry's key
    pub key: String,
    /// The stored payload
    pub value: String,
    /// Remaining TTL in display form
    pub ttl: String,
    /// Store-level value kind
    #[serde(rename = "type")]
    pub kind: String,
    /// Payload size in bytes
    pub size: usize,
}

// == Cache Client ==
/// Shared, cloneable handle to the cache store.
///
/// Constructed once at startup and injected into the middleware and the admin
/// handlers; holds no state beyond the backend handle.
#[derive(Clone)]
pub struct CacheClient {
    backend: Arc<dyn StoreBackend>,
}

impl CacheClient {
    // == Constructors ==
    /// Connects to Redis at `url`.
    ///
    /// Propagates connection failure; callers typically fall back to
    /// [`CacheClient::disabled`] and keep serving uncached.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let backend = RedisBackend::connect(url).await?;
        Ok(Self::with_backend(Arc::new(backend)))
    }

    /// Wraps an already-constructed backend (in-memory store, test doubles).
    pub fn with_backend(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Client whose every operation degrades to "cache unavailable".
    pub fn disabled() -> Self {
        Self::with_backend(Arc::new(DisabledBackend))
    }

    // == Get ==
    /// Looks up `key`, returning `None` on absence, expiry, or store failure.
    pub async fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!(key, %err, "cache get failed, treating as miss");
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` with an optional TTL.
    ///
    /// Silently no-ops on store failure; callers must not rely on cache
    /// writes succeeding.
    pub async fn set(&self, key: &str, value: &str, ttl: Option<u64>) {
        if let Err(err) = self.backend.set(key, value, ttl).await {
            warn!(key, %err, "cache set failed, skipping write");
        }
    }

    // == Delete ==
    /// Removes `key`; deleting a missing key is not an error.
    pub async fn delete(&self, key: &str) {
        if let Err(err) = self.backend.delete(key).await {
            warn!(key, %err, "cache delete failed");
        }
    }

    // == Clear All ==
    /// Flushes every key in the store's active namespace.
    ///
    /// Unscoped: not limited to cache-prefixed keys.
    pub async fn clear_all(&self) {
        match self.backend.flush_all().await {
            Ok(()) => info!("cache cleared"),
            Err(err) => warn!(%err, "cache clear failed"),
        }
    }

    // == List Keys ==
    /// Lists keys matching a glob pattern; empty on store failure.
    pub async fn list_keys(&self, pattern: &str) -> Vec<String> {
        match self.backend.keys(pattern).await {
            Ok(keys) => keys,
            Err(err) => {
                warn!(pattern, %err, "cache key listing failed");
                Vec::new()
            }
        }
    }

    // == Key TTL ==
    /// Remaining lifetime of `key`; `Missing` on store failure.
    pub async fn key_ttl(&self, key: &str) -> KeyTtl {
        match self.backend.ttl(key).await {
            Ok(ttl) => ttl,
            Err(err) => {
                warn!(key, %err, "cache ttl lookup failed");
                KeyTtl::Missing
            }
        }
    }

    // == Entry Details ==
    /// Full details of one entry; `None` when the key is absent or the store
    /// cannot be queried.
    pub async fn entry_details(&self, key: &str) -> Option<EntryDetails> {
        let value = match self.backend.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, %err, "cache detail lookup failed");
                return None;
            }
        };

        let ttl = self.key_ttl(key).await;
        let kind = self
            .backend
            .value_type(key)
            .await
            .unwrap_or_else(|_| "string".to_string());

        Some(EntryDetails {
            key: key.to_string(),
            size: value.len(),
            ttl: ttl.to_string(),
            kind,
            value,
        })
    }

    // == Stats ==
    /// Aggregate statistics snapshot; zeroed on store failure.
    pub async fn stats(&self) -> CacheStats {
        match self.backend.counters().await {
            Ok(counters) => CacheStats::from_counters(counters),
            Err(err) => {
                warn!(%err, "cache stats query failed");
                CacheStats::zeroed()
            }
        }
    }
}
