//! In-process cache implementation.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use lru_time_cache::LruCache;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Longest TTL an entry may ask for; also the LRU's own expiry.
const MAX_TTL: Duration = Duration::from_secs(60 * 60);

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Bounded LRU cache living inside the server process.
///
/// The underlying `LruCache` evicts by capacity and by [`MAX_TTL`]; each entry
/// additionally carries its own deadline so callers can use shorter TTLs.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, Entry>>,
}

impl MemoryCache {
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::with_expiry_duration_and_capacity(
                MAX_TTL, capacity,
            )),
        }
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut entries = self.entries.lock().await;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!("Cache HIT: {}", key);
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
        }
        debug!("Cache MISS: {}", key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let ttl = Duration::from_secs(ttl_seconds).min(MAX_TTL);
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };

        self.entries.lock().await.insert(key.to_string(), entry);
        debug!("Cache SET: {} (TTL: {}s)", key, ttl.as_secs());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
