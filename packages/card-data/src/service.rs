//! Cache-aside orchestration over the Spotify client and the cache store

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use tempocard_cache_store::CacheStore;
use tempocard_spotify_client::{
    AccessToken, Artist, SpotifyClient, SpotifyResult, Track, UserProfile,
};

use crate::keys;

/// Data-access service for music cards
///
/// Each operation runs the same state machine: compute the key, look in the
/// cache, return a hit without revalidation, otherwise fetch upstream,
/// kick off a background population, and return the fetched value. Upstream
/// failures propagate and write nothing; cache failures are absorbed.
#[derive(Clone)]
pub struct CardDataService {
    spotify: SpotifyClient,
    cache: Arc<dyn CacheStore>,
}

impl CardDataService {
    /// Create a new service over a Spotify client and a cache store
    pub fn new(spotify: SpotifyClient, cache: Arc<dyn CacheStore>) -> Self {
        Self { spotify, cache }
    }

    /// Get the user's profile
    ///
    /// Cached per user id with no expiry of its own. Pass `user_id` when the
    /// caller already knows it (e.g. from a session cookie) to enable the
    /// cache lookup; without it the profile is fetched upstream and cached
    /// under the id the fetch reveals.
    #[instrument(skip(self, token))]
    pub async fn get_user_profile(
        &self,
        token: &AccessToken,
        user_id: Option<&str>,
    ) -> SpotifyResult<UserProfile> {
        if let Some(user_id) = user_id {
            let key = keys::profile_key(user_id);
            if let Some(profile) = self.read_cached::<UserProfile>(&key).await {
                debug!(user_id, "Serving user profile from cache");
                return Ok(profile);
            }
        }

        let profile = self.spotify.get_profile(token).await?;

        self.populate_in_background(keys::profile_key(&profile.id), &profile, keys::PROFILE_TTL);

        Ok(profile)
    }

    /// Get the currently playing track, if any is showable
    ///
    /// Never cached: playback state is too time-sensitive.
    pub async fn get_now_playing(
        &self,
        token: &AccessToken,
        hide_explicit: bool,
    ) -> SpotifyResult<Option<Track>> {
        self.spotify.get_now_playing(token, hide_explicit).await
    }

    /// Get the user's recently played tracks
    ///
    /// Never cached: the listing changes with every play.
    pub async fn get_recently_played(
        &self,
        token: &AccessToken,
        hide_explicit: bool,
        limit: usize,
    ) -> SpotifyResult<Vec<Track>> {
        self.spotify
            .get_recently_played(token, hide_explicit, limit)
            .await
    }

    /// Get the user's top tracks
    ///
    /// Cached per (user, hide_explicit, limit) for the fixed top-items TTL.
    #[instrument(skip(self, token))]
    pub async fn get_top_tracks(
        &self,
        token: &AccessToken,
        user_id: &str,
        hide_explicit: bool,
        limit: usize,
    ) -> SpotifyResult<Vec<Track>> {
        let key = keys::top_tracks_key(user_id, hide_explicit, limit);
        if let Some(tracks) = self.read_cached::<Vec<Track>>(&key).await {
            debug!(user_id, "Serving top tracks from cache");
            return Ok(tracks);
        }

        let tracks = self
            .spotify
            .get_top_tracks(token, hide_explicit, limit)
            .await?;

        self.populate_in_background(key, &tracks, Some(keys::TOP_ITEMS_TTL));

        Ok(tracks)
    }

    /// Get the user's top artists
    ///
    /// Cached per (user, limit) for the fixed top-items TTL.
    #[instrument(skip(self, token))]
    pub async fn get_top_artists(
        &self,
        token: &AccessToken,
        user_id: &str,
        limit: usize,
    ) -> SpotifyResult<Vec<Artist>> {
        let key = keys::top_artists_key(user_id, limit);
        if let Some(artists) = self.read_cached::<Vec<Artist>>(&key).await {
            debug!(user_id, "Serving top artists from cache");
            return Ok(artists);
        }

        let artists = self.spotify.get_top_artists(token, limit).await?;

        self.populate_in_background(key, &artists, Some(keys::TOP_ITEMS_TTL));

        Ok(artists)
    }

    /// Read and decode a cached value, degrading every fault to a miss
    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, falling through to upstream");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Cached value failed to decode, treating as miss");
                None
            }
        }
    }

    /// Populate the cache after the result is already headed to the caller
    ///
    /// The write runs in its own task and is never awaited by the request
    /// path; a failure is logged and dropped.
    fn populate_in_background<T: Serialize>(&self, key: String, value: &T, ttl: Option<Duration>) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to encode value for cache, skipping population");
                return;
            }
        };

        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            if let Err(e) = cache.set(&key, encoded, ttl).await {
                warn!(key = %key, error = %e, "Cache population failed");
            }
        });
    }
}
