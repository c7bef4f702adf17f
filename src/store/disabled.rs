//! Disabled Store Backend
//!
//! Stand-in backend for degraded mode: when the real store is unreachable at
//! startup the service keeps running with this backend, every operation reports
//! `Unavailable`, and the adapter above turns that into permanent cache misses.

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::store::{KeyTtl, StoreBackend, StoreCounters};

// == Disabled Backend ==
/// Backend whose every operation fails with `StoreError::Unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledBackend;

impl DisabledBackend {
    fn unavailable() -> StoreError {
        StoreError::Unavailable("cache disabled".to_string())
    }
}

#[async_trait]
impl StoreBackend for DisabledBackend {
    async fn ping(&self) -> StoreResult<()> {
        Err(Self::unavailable())
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<u64>) -> StoreResult<()> {
        Err(Self::unavailable())
    }

    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(Self::unavailable())
    }

    async fn delete(&self, _key: &str) -> StoreResult<()> {
        Err(Self::unavailable())
    }

    async fn flush_all(&self) -> StoreResult<()> {
        Err(Self::unavailable())
    }

    async fn keys(&self, _pattern: &str) -> StoreResult<Vec<String>> {
        Err(Self::unavailable())
    }

    async fn ttl(&self, _key: &str) -> StoreResult<KeyTtl> {
        Err(Self::unavailable())
    }

    async fn value_type(&self, _key: &str) -> StoreResult<String> {
        Err(Self::unavailable())
    }

    async fn counters(&self) -> StoreResult<StoreCounters> {
        Err(Self::unavailable())
    }
}
