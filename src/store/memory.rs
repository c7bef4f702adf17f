//! In-Memory Store Backend
//!
//! A process-local `StoreBackend` used by the test suite and by deployments
//! without a Redis instance. Entries expire lazily on read; a background
//! sweeper (see `tasks`) reclaims entries nobody reads again.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::store::{KeyTtl, StoreBackend, StoreCounters};

// == Memory Entry ==
#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    /// None means the entry never expires
    expires_at: Option<Instant>,
}

impl MemoryEntry {
    fn new(value: String, ttl_seconds: Option<u64>) -> Self {
        Self {
            value,
            expires_at: ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl)),
        }
    }

    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    fn ttl_remaining(&self) -> KeyTtl {
        match self.expires_at {
            None => KeyTtl::NoExpiry,
            Some(expires) => {
                let now = Instant::now();
                if expires > now {
                    KeyTtl::Seconds((expires - now).as_secs())
                } else {
                    KeyTtl::Missing
                }
            }
        }
    }

    fn byte_size(&self, key: &str) -> u64 {
        (key.len() + self.value.len()) as u64
    }
}

// == Inner State ==
#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, MemoryEntry>,
    hits: u64,
    misses: u64,
    used_bytes: u64,
    peak_bytes: u64,
}

impl Inner {
    fn remove_entry(&mut self, key: &str) {
        if let Some(entry) = self.entries.remove(key) {
            self.used_bytes = self.used_bytes.saturating_sub(entry.byte_size(key));
        }
    }
}

// == Memory Backend ==
/// In-process key-value store with TTL expiry and keyspace hit/miss counters.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // == Sweep Expired ==
    /// Removes every expired entry, returning the number removed.
    ///
    /// Called periodically by the background sweeper so that keys nobody reads
    /// again still disappear from enumeration and counters.
    pub fn sweep_expired(&self) -> usize {
        let mut inner = self.lock();
        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.remove_entry(key);
        }
        expired.len()
    }

    /// Current number of live entries.
    pub fn len(&self) -> usize {
        let inner = self.lock();
        inner.entries.values().filter(|e| !e.is_expired()).count()
    }

    /// Returns true if no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.remove_entry(key);

        let entry = MemoryEntry::new(value.to_string(), ttl);
        inner.used_bytes += entry.byte_size(key);
        inner.peak_bytes = inner.peak_bytes.max(inner.used_bytes);
        inner.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut inner = self.lock();
        let lookup = inner
            .entries
            .get(key)
            .map(|entry| (entry.is_expired(), entry.value.clone()));

        match lookup {
            Some((true, _)) => {
                inner.remove_entry(key);
                inner.misses += 1;
                Ok(None)
            }
            Some((false, value)) => {
                inner.hits += 1;
                Ok(Some(value))
            }
            None => {
                inner.misses += 1;
                Ok(None)
            }
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.remove_entry(key);
        Ok(())
    }

    async fn flush_all(&self) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.entries.clear();
        // peak survives a flush, matching the Redis memory counters
        inner.used_bytes = 0;
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let inner = self.lock();
        Ok(inner
            .entries
            .iter()
            .filter(|(key, entry)| !entry.is_expired() && glob_match(pattern, key))
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn ttl(&self, key: &str) -> StoreResult<KeyTtl> {
        let inner = self.lock();
        match inner.entries.get(key) {
            Some(entry) => Ok(entry.ttl_remaining()),
            None => Ok(KeyTtl::Missing),
        }
    }

    async fn value_type(&self, key: &str) -> StoreResult<String> {
        let inner = self.lock();
        let kind = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired() => "string",
            _ => "none",
        };
        Ok(kind.to_string())
    }

    async fn counters(&self) -> StoreResult<StoreCounters> {
        let inner = self.lock();
        let total_keys = inner.entries.values().filter(|e| !e.is_expired()).count() as u64;
        Ok(StoreCounters {
            total_keys,
            hits: inner.hits,
            misses: inner.misses,
            memory_used: format_bytes(inner.used_bytes),
            memory_peak: format_bytes(inner.peak_bytes),
        })
    }
}

// == Glob Matching ==
/// Matches `text` against a Redis-style glob pattern supporting `*` and `?`.
pub(crate) fn glob_match(pattern: &str, text: &str) -> bool {
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while t < txt.len() {
        if p < pat.len() && (pat[p] == '?' || pat[p] == txt[t]) {
            p += 1;
            t += 1;
        } else if p < pat.len() && pat[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = star {
            // backtrack: let the last * consume one more character
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    while p < pat.len() && pat[p] == '*' {
        p += 1;
    }
    p == pat.len()
}

// == Byte Formatting ==
/// Formats a byte count the way Redis reports `used_memory_human`.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "K", "M", "G"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{}B", bytes)
    } else {
        format!("{:.2}{}", value, UNITS[unit])
    }
}
