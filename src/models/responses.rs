//! Response DTOs for the cache administration API
//!
//! Every admin operation answers with a uniform envelope carrying a success
//! flag, so any client can parse all operations with one code path.

use serde::Serialize;

use crate::cache::{CacheStats, EntryDetails};

/// One key with its remaining TTL, as listed by GET /keys
#[derive(Debug, Clone, Serialize)]
pub struct KeyWithTtl {
    /// The cache key
    pub key: String,
    /// Remaining TTL in display form
    pub ttl: String,
}

/// Response body for the key listing endpoint (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysListing {
    /// Always true on the success path
    pub success: bool,
    /// Number of keys matched
    pub count: usize,
    /// Matched keys with TTLs
    pub keys: Vec<KeyWithTtl>,
}

impl KeysListing {
    /// Creates a listing envelope from resolved keys.
    pub fn new(keys: Vec<KeyWithTtl>) -> Self {
        Self {
            success: true,
            count: keys.len(),
            keys,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsEnvelope {
    pub success: bool,
    pub stats: CacheStats,
}

impl StatsEnvelope {
    pub fn new(stats: CacheStats) -> Self {
        Self { success: true, stats }
    }
}

/// Response body for the single-entry detail endpoint (GET /key/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DetailsEnvelope {
    pub success: bool,
    pub details: EntryDetails,
}

impl DetailsEnvelope {
    pub fn new(details: EntryDetails) -> Self {
        Self {
            success: true,
            details,
        }
    }
}

/// Response body for delete and clear operations
#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub success: bool,
    /// Human-readable outcome description
    pub message: String,
}

impl ActionReport {
    /// Report for a single-key delete; success regardless of prior existence.
    pub fn deleted(key: &str) -> Self {
        Self {
            success: true,
            message: format!("Key '{}' deleted successfully", key),
        }
    }

    /// Report for a full store flush.
    pub fn cleared() -> Self {
        Self {
            success: true,
            message: "All cache cleared successfully".to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_listing_counts() {
        let listing = KeysListing::new(vec![
            KeyWithTtl {
                key: "cache:/listings".to_string(),
                ttl: "42s".to_string(),
            },
            KeyWithTtl {
                key: "cache:/agents".to_string(),
                ttl: "No expiration".to_string(),
            },
        ]);

        assert!(listing.success);
        assert_eq!(listing.count, 2);

        let json = serde_json::to_string(&listing).unwrap();
        assert!(json.contains(r#""count":2"#));
        assert!(json.contains("No expiration"));
    }

    #[test]
    fn test_action_report_messages() {
        let deleted = ActionReport::deleted("cache:/listings");
        assert!(deleted.success);
        assert!(deleted.message.contains("cache:/listings"));

        let cleared = ActionReport::cleared();
        assert!(cleared.message.contains("cleared"));
    }

    #[test]
    fn test_stats_envelope_serializes() {
        let envelope = StatsEnvelope::new(CacheStats::zeroed());
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""stats""#));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
