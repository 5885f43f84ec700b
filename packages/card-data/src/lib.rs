//! Cache-aside data access for tempocard music cards
//!
//! [`CardDataService`] turns an access token into the normalized,
//! display-ready data a card renders: the user's profile, the currently
//! playing track, recently played tracks, top tracks, and top artists.
//!
//! The service sits between a rate-limited upstream API and a key-value
//! cache and applies one policy consistently across the data classes:
//!
//! - **Cache-aside** for the slow-moving classes (profile, top tracks, top
//!   artists): serve a hit as-is, fetch-and-populate on a miss. Population
//!   runs as a background task after the result is already on its way to the
//!   caller.
//! - **Always fresh** for the time-sensitive classes (now playing, recently
//!   played): never cached.
//! - **Fail-open** toward the cache: any store fault is logged and degrades
//!   to "fetch upstream"; it never fails the request.
//! - **Fail-closed** toward upstream: an upstream fault is surfaced as a
//!   [`SpotifyError`] because there is no safe fallback for display data.
//!   The five operations are independent, so a caller can still render the
//!   classes that succeeded.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tempocard_card_data::CardDataService;
//! use tempocard_cache_store::RedisCacheStore;
//! use tempocard_shared_config::CommonConfig;
//! use tempocard_spotify_client::{AccessToken, SpotifyClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CommonConfig::from_env()?;
//! let spotify = SpotifyClient::new(&config.spotify)?;
//! let cache = Arc::new(RedisCacheStore::connect(&config.redis).await?);
//!
//! let service = CardDataService::new(spotify, cache);
//! let token = AccessToken::new("bearer-token-from-auth-flow");
//!
//! let profile = service.get_user_profile(&token, None).await?;
//! let top = service.get_top_tracks(&token, &profile.id, true, 10).await?;
//! println!("{} has {} top tracks", profile.display_name, top.len());
//! # Ok(())
//! # }
//! ```

mod keys;
mod service;

pub use service::CardDataService;

pub use tempocard_cache_store::{CacheStore, RedisCacheStore};
pub use tempocard_spotify_client::{
    AccessToken, Artist, SpotifyClient, SpotifyError, SpotifyResult, Track, UserProfile,
    FILTER_OVERFETCH_LIMIT,
};
