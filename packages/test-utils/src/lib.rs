//! Shared test utilities for the tempocard workspace
//!
//! This crate provides mock implementations of the two external services the
//! data-access layer talks to, so tests run without network dependencies.
//!
//! # Mocks
//!
//! - [`MockSpotifyServer`] - wiremock-backed Spotify Web API with JSON
//!   fixture builders and expected-call counts
//! - [`MemoryCacheStore`] - in-memory [`CacheStore`] with TTL bookkeeping
//! - [`FailingCacheStore`] - a [`CacheStore`] whose every operation fails,
//!   for fail-open injection tests
//!
//! # Example
//!
//! ```rust,ignore
//! use tempocard_test_utils::{track_json, MemoryCacheStore, MockSpotifyServer};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let server = MockSpotifyServer::start().await;
//!     server.mock_top_tracks(&[track_json("Song", false)]).await;
//!
//!     // Build a SpotifyClient against server.config()
//! }
//! ```
//!
//! [`CacheStore`]: tempocard_cache_store::CacheStore

mod spotify;
mod store;

pub use spotify::{artist_json, track_json, track_json_without_url, MockSpotifyServer};
pub use store::{FailingCacheStore, MemoryCacheStore};
