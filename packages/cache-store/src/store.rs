//! The cache store trait

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheResult;

/// A key-value store with per-entry expiry
///
/// Values are opaque strings; callers own the serialization of whatever shape
/// they cache (a profile record, a track collection). Entries are immutable
/// once written: a refresh overwrites the whole entry rather than mutating
/// it in place.
///
/// Implementations must be safe for concurrent use from multiple in-flight
/// requests, across users and across data classes for the same user.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` when the key is absent or its entry has expired.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Write `value` under `key`
    ///
    /// `ttl` of `None` persists the entry until store-level eviction removes
    /// it. A `ttl` of `Some(d)` expires the entry after `d`.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()>;
}
