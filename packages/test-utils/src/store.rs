//! Mock cache stores for testing cache-aside behavior
//!
//! [`MemoryCacheStore`] simulates the key-value store in-memory, including
//! per-entry expiry; [`FailingCacheStore`] fails every operation so tests
//! can verify the fail-open contract.
//!
//! # Lock Poisoning Recovery
//!
//! The memory store acquires its locks with
//! `unwrap_or_else(|e| e.into_inner())` so a test that panics while holding
//! a lock does not poison the store for subsequent tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use tempocard_cache_store::{CacheError, CacheResult, CacheStore};

struct MemoryEntry {
    value: String,
    expires_at: Option<Instant>,
}

/// In-memory cache store for tests
///
/// Clones share the same underlying map, so a store handed to the service
/// under test can still be inspected from the test body.
pub struct MemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, MemoryEntry>>>,
}

impl MemoryCacheStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed an entry synchronously (test setup helper)
    pub fn insert(&self, key: &str, value: String, ttl: Option<Duration>) {
        let expires_at = ttl.map(|d| Instant::now() + d);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), MemoryEntry { value, expires_at });
    }

    /// Read an entry synchronously, honoring expiry (test assertion helper)
    pub fn raw_get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).and_then(|entry| {
            if let Some(expires_at) = entry.expires_at {
                if Instant::now() > expires_at {
                    return None;
                }
            }
            Some(entry.value.clone())
        })
    }

    /// Remaining TTL for a key
    ///
    /// `Some(None)` means the entry exists without an expiry; `None` means
    /// the key is absent or expired.
    pub fn ttl(&self, key: &str) -> Option<Option<Duration>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).and_then(|entry| match entry.expires_at {
            Some(expires_at) => {
                let now = Instant::now();
                if now > expires_at {
                    None
                } else {
                    Some(Some(expires_at - now))
                }
            }
            None => Some(None),
        })
    }

    /// Number of entries, including expired ones not yet cleaned up
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries
    pub fn flush_all(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryCacheStore {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.raw_get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()> {
        self.insert(key, value, ttl);
        Ok(())
    }
}

/// A cache store whose every operation fails
///
/// Simulates a store outage; the data-access layer must degrade to
/// "always fetch upstream" rather than surface these errors. Call counters
/// let tests assert the store was actually consulted.
pub struct FailingCacheStore {
    get_calls: Arc<AtomicUsize>,
    set_calls: Arc<AtomicUsize>,
}

impl FailingCacheStore {
    /// Create a new failing store
    pub fn new() -> Self {
        Self {
            get_calls: Arc::new(AtomicUsize::new(0)),
            set_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of failed read attempts
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Number of failed write attempts
    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }
}

impl Default for FailingCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FailingCacheStore {
    fn clone(&self) -> Self {
        Self {
            get_calls: self.get_calls.clone(),
            set_calls: self.set_calls.clone(),
        }
    }
}

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Connect("simulated cache outage".to_string()))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Option<Duration>) -> CacheResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Connect("simulated cache outage".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_set_and_get() {
        let store = MemoryCacheStore::new();
        store
            .set("key1", "value1".to_string(), Some(Duration::from_secs(3600)))
            .await
            .unwrap();

        assert_eq!(store.get("key1").await.unwrap(), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_no_ttl_persists() {
        let store = MemoryCacheStore::new();
        store.set("key1", "value1".to_string(), None).await.unwrap();

        assert_eq!(store.ttl("key1"), Some(None));
        assert_eq!(store.get("key1").await.unwrap(), Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_memory_store_expired_entry_is_miss() {
        let store = MemoryCacheStore::new();
        store.insert("key1", "value1".to_string(), Some(Duration::ZERO));

        // Zero TTL expires immediately
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(store.get("key1").await.unwrap(), None);
        assert_eq!(store.ttl("key1"), None);
    }

    #[tokio::test]
    async fn test_memory_store_overwrite_replaces_entry() {
        let store = MemoryCacheStore::new();
        store.insert("key1", "old".to_string(), None);
        store
            .set("key1", "new".to_string(), Some(Duration::from_secs(60)))
            .await
            .unwrap();

        assert_eq!(store.raw_get("key1"), Some("new".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_clone_shares_entries() {
        let store = MemoryCacheStore::new();
        let clone = store.clone();
        clone.insert("key1", "value1".to_string(), None);

        assert_eq!(store.raw_get("key1"), Some("value1".to_string()));
    }

    #[test]
    fn test_memory_store_flush_all() {
        let store = MemoryCacheStore::new();
        store.insert("key1", "value1".to_string(), None);
        store.insert("key2", "value2".to_string(), None);
        assert_eq!(store.len(), 2);

        store.flush_all();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failing_store_errors_and_counts() {
        let store = FailingCacheStore::new();

        assert!(store.get("key1").await.is_err());
        assert!(store.set("key1", "v".to_string(), None).await.is_err());
        assert_eq!(store.get_calls(), 1);
        assert_eq!(store.set_calls(), 1);
    }
}
