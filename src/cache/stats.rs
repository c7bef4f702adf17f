//! Cache Statistics Snapshot
//!
//! Point-in-time view of store-wide counters, derived on demand and never
//! persisted. Field names follow the operator dashboard's wire format.

use serde::Serialize;

use crate::store::StoreCounters;

// == Cache Stats ==
/// Aggregate cache statistics served by the admin API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of live keys in the store's active namespace
    pub total_keys: u64,
    /// Cumulative keyspace hits
    pub hits: u64,
    /// Cumulative keyspace misses
    pub misses: u64,
    /// Hit percentage with two decimals, "0.00" when no activity yet
    pub hit_rate: String,
    /// Human-readable current memory usage
    pub memory_used: String,
    /// Human-readable peak memory usage
    pub memory_peak: String,
}

impl CacheStats {
    // == From Counters ==
    /// Derives a snapshot from raw backend counters.
    pub fn from_counters(counters: StoreCounters) -> Self {
        Self {
            total_keys: counters.total_keys,
            hits: counters.hits,
            misses: counters.misses,
            hit_rate: format_hit_rate(counters.hits, counters.misses),
            memory_used: counters.memory_used,
            memory_peak: counters.memory_peak,
        }
    }

    // == Zeroed ==
    /// Empty snapshot returned when the store cannot be queried.
    pub fn zeroed() -> Self {
        Self {
            total_keys: 0,
            hits: 0,
            misses: 0,
            hit_rate: "0.00".to_string(),
            memory_used: "N/A".to_string(),
            memory_peak: "N/A".to_string(),
        }
    }
}

// == Hit Rate ==
/// Formats hits / (hits + misses) as a percentage string.
fn format_hit_rate(hits: u64, misses: u64) -> String {
    let total = hits + misses;
    if total == 0 {
        "0.00".to_string()
    } else {
        format!("{:.2}", (hits as f64 / total as f64) * 100.0)
    }
}
