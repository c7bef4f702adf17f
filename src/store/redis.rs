//! Redis Store Backend
//!
//! Maps the `StoreBackend` trait onto a shared Redis connection. A single
//! `ConnectionManager` is created at startup and cloned per operation; the
//! manager multiplexes concurrent commands and reconnects on its own.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::info;

use crate::error::StoreResult;
use crate::store::{KeyTtl, StoreBackend, StoreCounters};

// == Redis Backend ==
/// `StoreBackend` implementation over a live Redis instance.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    // == Connect ==
    /// Connects to Redis at `url` and verifies the link with a PING.
    ///
    /// Fails loudly; the caller decides whether to fall back to a disabled
    /// cache rather than crash the service.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;

        let backend = Self { conn };
        backend.ping().await?;
        info!(url, "connected to redis");
        Ok(backend)
    }

    fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }
}

#[async_trait]
impl StoreBackend for RedisBackend {
    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> StoreResult<()> {
        let mut conn = self.connection();
        match ttl {
            Some(seconds) => {
                let _: () = conn.set_ex(key, value, seconds).await?;
            }
            None => {
                let _: () = conn.set(key, value).await?;
            }
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.connection();
        // DEL returns the number of keys removed; zero is still success
        let _: u64 = conn.del(key).await?;
        Ok(())
    }

    async fn flush_all(&self) -> StoreResult<()> {
        let mut conn = self.connection();
        let _: () = redis::cmd("FLUSHALL").query_async(&mut conn).await?;
        info!("redis store flushed");
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.connection();
        let keys: Vec<String> = conn.keys(pattern).await?;
        Ok(keys)
    }

    async fn ttl(&self, key: &str) -> StoreResult<KeyTtl> {
        let mut conn = self.connection();
        let raw: i64 = conn.ttl(key).await?;
        Ok(KeyTtl::from_redis(raw))
    }

    async fn value_type(&self, key: &str) -> StoreResult<String> {
        let mut conn = self.connection();
        let kind: String = redis::cmd("TYPE").arg(key).query_async(&mut conn).await?;
        Ok(kind)
    }

    async fn counters(&self) -> StoreResult<StoreCounters> {
        let mut conn = self.connection();

        let total_keys: u64 = redis::cmd("DBSIZE").query_async(&mut conn).await?;
        let stats_info: String = redis::cmd("INFO").arg("stats").query_async(&mut conn).await?;
        let memory_info: String = redis::cmd("INFO").arg("memory").query_async(&mut conn).await?;

        let stats = parse_info(&stats_info);
        let memory = parse_info(&memory_info);

        Ok(StoreCounters {
            total_keys,
            hits: field_u64(&stats, "keyspace_hits"),
            misses: field_u64(&stats, "keyspace_misses"),
            memory_used: field_str(&memory, "used_memory_human"),
            memory_peak: field_str(&memory, "used_memory_peak_human"),
        })
    }
}

// == INFO Parsing ==
/// Parses a Redis INFO section into key/value pairs, skipping `#` comment lines.
fn parse_info(raw: &str) -> HashMap<&str, &str> {
    raw.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key, value.trim_end_matches('\r')))
        .collect()
}

fn field_u64(fields: &HashMap<&str, &str>, name: &str) -> u64 {
    fields.get(name).and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn field_str(fields: &HashMap<&str, &str>, name: &str) -> String {
    fields.get(name).map(|v| (*v).to_string()).unwrap_or_else(|| "N/A".to_string())
}
