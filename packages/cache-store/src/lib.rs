//! Key-value cache store for tempocard
//!
//! The cache is a pure optimization layer in front of the Spotify Web API:
//! values are written with a per-entry TTL and read back by the same system
//! that wrote them. Store faults are reported as typed [`CacheError`]s so the
//! caller can degrade to "always fetch upstream"; the store itself never
//! decides policy.
//!
//! [`CacheStore`] is the seam: production code uses [`RedisCacheStore`],
//! tests substitute in-memory or always-failing implementations.

mod error;
mod redis;
mod store;

pub use error::{CacheError, CacheResult};
pub use self::redis::RedisCacheStore;
pub use store::CacheStore;
