//! Key-Value Store Backends
//!
//! Defines the `StoreBackend` trait the cache adapter is generic over, plus the
//! three implementations: Redis for production, an in-process map for tests and
//! standalone use, and a stub for degraded (cache disabled) mode.

mod disabled;
pub(crate) mod memory;
mod redis;

pub use self::redis::RedisBackend;
pub use disabled::DisabledBackend;
pub use memory::MemoryBackend;

use std::fmt;

use async_trait::async_trait;

use crate::error::StoreResult;

// == Key TTL State ==
/// Remaining lifetime of a key, mirroring the Redis TTL reply (-1 / -2 / n).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// Entry exists and never expires
    NoExpiry,
    /// No entry under this key
    Missing,
    /// Entry expires after this many seconds
    Seconds(u64),
}

impl KeyTtl {
    /// Maps a raw Redis TTL reply to a `KeyTtl`.
    pub fn from_redis(raw: i64) -> Self {
        match raw {
            -1 => KeyTtl::NoExpiry,
            raw if raw < 0 => KeyTtl::Missing,
            raw => KeyTtl::Seconds(raw as u64),
        }
    }
}

impl fmt::Display for KeyTtl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyTtl::NoExpiry => write!(f, "No expiration"),
            KeyTtl::Missing => write!(f, "Key does not exist"),
            KeyTtl::Seconds(n) => write!(f, "{}s", n),
        }
    }
}

// == Raw Store Counters ==
/// Aggregate counters reported by a backend, before hit-rate derivation.
#[derive(Debug, Clone)]
pub struct StoreCounters {
    /// Number of live keys in the active namespace
    pub total_keys: u64,
    /// Cumulative keyspace hits
    pub hits: u64,
    /// Cumulative keyspace misses
    pub misses: u64,
    /// Human-readable current memory usage
    pub memory_used: String,
    /// Human-readable peak memory usage
    pub memory_peak: String,
}

// == Store Backend Trait ==
/// Uniform interface to a shared key-value store.
///
/// One backend instance is created at startup and shared by every in-flight
/// request; implementations hold no mutable state beyond the connection handle
/// (or the map itself) and serialize concurrent operations internally.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Round-trips to the store to verify it is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Stores `value` under `key`; with `ttl` the entry expires after that many
    /// seconds, without it the entry persists until explicitly deleted.
    async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> StoreResult<()>;

    /// Retrieves the value under `key`, `None` if absent or expired.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Removes the entry under `key`; deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Flushes every key in the store's active namespace, not just
    /// cache-prefixed ones. Destructive and unscoped.
    async fn flush_all(&self) -> StoreResult<()>;

    /// Lists keys matching a glob-style pattern (`*`, `?`).
    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Reports the remaining lifetime of `key`.
    async fn ttl(&self, key: &str) -> StoreResult<KeyTtl>;

    /// Reports the store-level value kind of `key` ("string", or "none" when absent).
    async fn value_type(&self, key: &str) -> StoreResult<String>;

    /// Reports aggregate statistics counters.
    async fn counters(&self) -> StoreResult<StoreCounters>;
}
