//! Admin API Routes
//!
//! Configures the Axum router for the cache administration surface.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_key_handler, health_handler, key_details_handler, list_keys_handler,
    stats_handler, AppState,
};

/// Creates the admin router with all endpoints configured.
///
/// # Endpoints
/// - `GET /keys` - List cached keys (optional `?pattern=` glob) with TTLs
/// - `GET /stats` - Aggregate cache statistics
/// - `GET /key/:key` - Full details of one entry
/// - `DELETE /key/:key` - Delete one entry (idempotent)
/// - `DELETE /clear` - Flush the entire store namespace
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_admin_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/keys", get(list_keys_handler))
        .route("/stats", get(stats_handler))
        .route("/key/:key", get(key_details_handler).delete(delete_key_handler))
        .route("/clear", delete(clear_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
