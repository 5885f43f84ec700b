//! Cache store error types

use thiserror::Error;

/// Cache store errors
///
/// These are internal to the data-access layer: callers log them and treat a
/// failed read as a miss and a failed write as a skipped population. They are
/// never surfaced to the user-facing request.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Could not establish a connection to the store
    #[error("cache connection failed: {0}")]
    Connect(String),

    /// A Redis command failed
    #[error("cache command failed: {0}")]
    Redis(#[from] redis::RedisError),

    /// A command exceeded its time bound
    #[error("cache command timed out after {0}s")]
    Timeout(u64),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
