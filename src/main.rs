//! cachefront - A read-through HTTP response cache service
//!
//! Hosts the cache administration API over a shared store client. The same
//! client is exported through the library for applications mounting the
//! read-through middleware on their own routes.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cachefront::api::{create_admin_router, AppState};
use cachefront::cache::CacheClient;
use cachefront::config::{BackendKind, Config};
use cachefront::store::MemoryBackend;
use cachefront::tasks::spawn_sweep_task;

/// Main entry point for the cachefront service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to the store (falling back to disabled mode if unreachable)
/// 4. Start the expired-entry sweeper when running on the in-memory backend
/// 5. Create Axum router with the admin API mounted at /api/cache
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cachefront=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cachefront");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, port={}, redis_url={}",
        config.backend, config.server_port, config.redis_url
    );

    // Build the store client; a dead Redis degrades to uncached serving
    // instead of refusing to start
    let (client, sweeper) = match config.backend {
        BackendKind::Memory => {
            let backend = Arc::new(MemoryBackend::new());
            let sweeper = spawn_sweep_task(backend.clone(), config.sweep_interval);
            info!("In-memory store initialized, sweeper started");
            (CacheClient::with_backend(backend), Some(sweeper))
        }
        BackendKind::Redis => match CacheClient::connect(&config.redis_url).await {
            Ok(client) => (client, None),
            Err(err) => {
                warn!(%err, "store unreachable, caching disabled");
                (CacheClient::disabled(), None)
            }
        },
    };

    let state = AppState::new(client);
    let app = axum::Router::new().nest("/api/cache", create_admin_router(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper task and allows graceful shutdown.
async fn shutdown_signal(sweeper: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sweeper {
        handle.abort();
        warn!("Sweeper task aborted");
    }
}
