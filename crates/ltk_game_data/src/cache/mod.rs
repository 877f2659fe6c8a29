//! TTL and version-keyed cache shared by every fetcher.
//!
//! A [`CacheStore`] is a namespaced view over a [`KeyValueStore`] backend.
//! Entries are persisted as JSON:
//!
//! ```json
//! { "data": { ... }, "timestamp": 1734000000000, "version": "14.24.1" }
//! ```
//!
//! An entry is served only while it is younger than the store's TTL and, when
//! the caller supplies an expected version tag, while its tag matches. Stale,
//! mismatched and unreadable entries are evicted lazily on read; nothing sweeps
//! the backend in the background.
//!
//! The store never surfaces errors from [`get`](CacheStore::get) or
//! [`set`](CacheStore::set): a broken backend behaves like an always-empty cache.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Source of the current time, in UNIX epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A cached value together with when and for which version it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    /// Insertion time in UNIX epoch milliseconds.
    pub timestamp: i64,
    /// Version tag the data belongs to; empty for caches not tied to a patch.
    #[serde(rename = "version")]
    pub version_tag: String,
}

impl<T> CacheEntry<T> {
    /// Whether the entry may still be served.
    ///
    /// `expected_version` of `None` skips the version comparison.
    pub fn is_valid(&self, now_millis: i64, ttl: Duration, expected_version: Option<&str>) -> bool {
        let age = now_millis.saturating_sub(self.timestamp);
        let fresh = age <= ttl.as_millis() as i64;
        let version_ok = expected_version.map_or(true, |v| v == self.version_tag);
        fresh && version_ok
    }
}

/// Namespaced cache over a shared backend.
///
/// Cloning is cheap; clones share the backend and clock.
#[derive(Clone)]
pub struct CacheStore {
    backend: Arc<dyn KeyValueStore>,
    namespace: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("namespace", &self.namespace)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CacheStore {
    /// Create a store whose keys are all prefixed with `namespace`.
    pub fn new(backend: Arc<dyn KeyValueStore>, namespace: impl Into<String>, ttl: Duration) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for timestamps and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    /// Read a live entry, evicting it if it is stale, mismatched or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, expected_version: Option<&str>) -> Option<T> {
        match self.try_get(key, expected_version) {
            Ok(value) => value,
            Err(e) => {
                let full_key = self.full_key(key);
                tracing::warn!("Cache read failed for {}: {}", full_key, e);
                if let Err(e) = self.backend.remove(&full_key) {
                    tracing::warn!("Failed to evict {}: {}", full_key, e);
                }
                None
            }
        }
    }

    /// Like [`get`](Self::get), but reports backend and decoding failures.
    ///
    /// Stale or mismatched entries are still evicted and reported as `Ok(None)`.
    pub fn try_get<T: DeserializeOwned>(
        &self,
        key: &str,
        expected_version: Option<&str>,
    ) -> Result<Option<T>> {
        let full_key = self.full_key(key);
        let Some(raw) = self.backend.get(&full_key)? else {
            tracing::debug!("Cache miss: {}", full_key);
            return Ok(None);
        };

        let entry: CacheEntry<T> = serde_json::from_str(&raw)
            .map_err(|e| Error::Storage(format!("corrupt entry {}: {}", full_key, e)))?;

        if !entry.is_valid(self.clock.now_millis(), self.ttl, expected_version) {
            tracing::debug!("Cache entry expired or outdated: {}", full_key);
            self.backend.remove(&full_key)?;
            return Ok(None);
        }

        tracing::debug!("Cache hit: {}", full_key);
        Ok(Some(entry.data))
    }

    /// Store `data`, replacing any previous entry for `key` wholesale.
    pub fn set<T: Serialize>(&self, key: &str, data: &T, version_tag: &str) {
        if let Err(e) = self.try_set(key, data, version_tag) {
            tracing::warn!("Cache write failed for {}{}: {}", self.namespace, key, e);
        }
    }

    pub fn try_set<T: Serialize>(&self, key: &str, data: &T, version_tag: &str) -> Result<()> {
        let entry = CacheEntry {
            data,
            timestamp: self.clock.now_millis(),
            version_tag: version_tag.to_string(),
        };
        let raw = serde_json::to_string(&entry)?;
        self.backend.set(&self.full_key(key), &raw)
    }

    /// Remove every backend key starting with `prefix`, regardless of namespace.
    ///
    /// Returns how many entries were removed.
    pub fn clear(&self, prefix: &str) -> usize {
        clear_prefix(self.backend.as_ref(), prefix)
    }

    /// Remove every entry in this store's namespace.
    pub fn clear_namespace(&self) -> usize {
        self.clear(&self.namespace)
    }
}

/// Remove every key under `prefix` from `backend`, leaving other keys untouched.
pub fn clear_prefix(backend: &dyn KeyValueStore, prefix: &str) -> usize {
    let keys = match backend.keys() {
        Ok(keys) => keys,
        Err(e) => {
            tracing::warn!("Failed to enumerate cache keys: {}", e);
            return 0;
        }
    };

    let mut removed = 0;
    for key in keys.iter().filter(|k| k.starts_with(prefix)) {
        match backend.remove(key) {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!("Failed to remove {}: {}", key, e),
        }
    }
    tracing::info!("Cleared {} cache entries under '{}'", removed, prefix);
    removed
}
