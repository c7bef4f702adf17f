//! Cache Administration API
//!
//! Operator-facing HTTP surface over the cache adapter, independent of the
//! request-serving path.
//!
//! # Endpoints
//! - `GET /keys` - List cached keys with remaining TTL
//! - `GET /stats` - Aggregate cache statistics
//! - `GET /key/:key` - Full details of one entry
//! - `DELETE /key/:key` - Delete one entry
//! - `DELETE /clear` - Flush the entire store
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_admin_router;
