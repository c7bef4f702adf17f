//! Cache Module
//!
//! The read-through response cache: deterministic key derivation, the
//! failure-absorbing store adapter, the axum middleware, and the statistics
//! snapshot served to operators.

mod client;
mod key;
mod middleware;
mod stats;


// Re-export public types
pub use client::{CacheClient, EntryDetails};
pub use key::{request_key, KEY_PREFIX};
pub use middleware::{read_through, CacheLayer};
pub use stats::CacheStats;

// == Public Constants ==
/// TTL applied when a layer is built without an explicit one
pub const DEFAULT_TTL_SECONDS: u64 = 60;

/// Largest response body the middleware will capture into the store
pub const MAX_CACHEABLE_BODY: usize = 1024 * 1024; // 1 MB
