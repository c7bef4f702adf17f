//! cachefront - A read-through HTTP response cache
//!
//! Serves cached JSON responses in front of expensive read endpoints, backed
//! by a key-value store with TTL expiry, with an operator API for inspection
//! and invalidation. Store failures degrade to uncached serving, never to
//! client-visible errors.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{create_admin_router, AppState};
pub use cache::{read_through, CacheClient, CacheLayer};
pub use config::Config;
pub use tasks::spawn_sweep_task;
