//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Which store backend the service runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Networked Redis instance (production)
    Redis,
    /// In-process store, no external dependency
    Memory,
}

impl BackendKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "redis" => Some(BackendKind::Redis),
            "memory" => Some(BackendKind::Memory),
            _ => None,
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL
    pub redis_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Store backend to run against
    pub backend: BackendKind,
    /// Expired-entry sweep interval in seconds (memory backend only)
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis connection URL (default: redis://localhost:6379)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_BACKEND` - "redis" or "memory" (default: redis)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| BackendKind::parse(&v))
                .unwrap_or(BackendKind::Redis),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            server_port: 3000,
            backend: BackendKind::Redis,
            sweep_interval: 1,
        }
    }
}
