//! Expired Entry Sweeper
//!
//! The in-process backend expires entries lazily on read; this task walks the
//! map on an interval so entries nobody reads again still disappear from key
//! enumeration and counters. Redis enforces TTLs itself and needs no sweeper.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::store::MemoryBackend;

/// Spawns the periodic expired-entry sweep for an in-memory store.
///
/// Returns the task handle so the caller can abort it on shutdown.
pub fn spawn_sweep_task(store: Arc<MemoryBackend>, interval_seconds: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;
            let removed = store.sweep_expired();
            if removed > 0 {
                debug!(removed, "swept expired cache entries");
            }
        }
    })
}
