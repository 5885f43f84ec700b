//! Spotify Web API client implementation

use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use tempocard_shared_config::SpotifyConfig;

use crate::error::{SpotifyError, SpotifyResult};
use crate::models::{
    Artist, ErrorResponse, NowPlayingResponse, RawProfile, RecentlyPlayedResponse,
    TopArtistsResponse, TopTracksResponse, Track, UserProfile,
};

/// User agent sent with every request
const USER_AGENT: &str = "tempocard/1.0";

/// Maximum error body size to keep in an error message
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// How many items to request from upstream when explicit filtering is active
///
/// Explicit tracks are filtered client-side after the fetch, so asking for
/// exactly `limit` items could starve the result below `limit`. Instead the
/// client requests this fixed batch size and truncates after filtering. The
/// quantity is fixed rather than scaled: a caller asking for more than this
/// many items with filtering enabled may legitimately receive fewer, even
/// when more eligible items exist upstream.
pub const FILTER_OVERFETCH_LIMIT: usize = 20;

/// An opaque bearer token for the Spotify Web API
///
/// Acquisition and refresh happen elsewhere; this layer only forwards the
/// credential. `Debug` redacts the secret.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a bearer token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw bearer string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// Spotify Web API client
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: Client,
    config: SpotifyConfig,
}

impl fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("api_base_url", &self.config.api_base_url)
            .finish()
    }
}

impl SpotifyClient {
    /// Create a new Spotify client from configuration
    pub fn new(config: &SpotifyConfig) -> SpotifyResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    /// Issue an authenticated GET and handle common error cases
    ///
    /// Timeouts, rate limiting, and non-2xx responses are mapped here; a
    /// non-2xx error message surfaces the upstream body's own error text
    /// when it is parseable.
    async fn make_request(
        &self,
        url: &str,
        token: &AccessToken,
        query: &[(&str, String)],
    ) -> SpotifyResult<reqwest::Response> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(token.as_str())
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpotifyError::Timeout
                } else {
                    SpotifyError::Http(e)
                }
            })?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            warn!("Spotify API rate limited");
            return Err(SpotifyError::RateLimited);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Ok(response)
    }

    async fn response_text(response: reqwest::Response) -> SpotifyResult<String> {
        response.text().await.map_err(|e| {
            if e.is_timeout() {
                SpotifyError::Timeout
            } else {
                SpotifyError::Http(e)
            }
        })
    }

    /// Fetch the authenticated user's profile
    #[instrument(skip(self, token))]
    pub async fn get_profile(&self, token: &AccessToken) -> SpotifyResult<UserProfile> {
        debug!("Fetching user profile from Spotify");

        let response = self
            .make_request(&self.config.profile_url(), token, &[])
            .await?;
        let text = Self::response_text(response).await?;
        let raw: RawProfile = serde_json::from_str(&text)?;

        Ok(raw.into())
    }

    /// Fetch the track the user is listening to right now
    ///
    /// Returns `Ok(None)` when there is nothing to show: no playback session,
    /// playback paused, no reported item, or an explicit item while
    /// `hide_explicit` is set. None of those are errors.
    #[instrument(skip(self, token))]
    pub async fn get_now_playing(
        &self,
        token: &AccessToken,
        hide_explicit: bool,
    ) -> SpotifyResult<Option<Track>> {
        debug!("Fetching currently playing track from Spotify");

        let response = self
            .make_request(&self.config.now_playing_url(), token, &[])
            .await?;

        // Spotify reports "no playback session" as an empty 204
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = Self::response_text(response).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let raw: NowPlayingResponse = serde_json::from_str(&text)?;
        if !raw.is_playing {
            return Ok(None);
        }

        let track = match raw.item.and_then(Track::from_raw) {
            Some(track) => track,
            None => return Ok(None),
        };

        if hide_explicit && track.explicit {
            return Ok(None);
        }

        Ok(Some(track))
    }

    /// Fetch the user's recently played tracks
    ///
    /// Filters explicit tracks before truncating to `limit`; see
    /// [`FILTER_OVERFETCH_LIMIT`] for the fetch quantity under filtering.
    #[instrument(skip(self, token))]
    pub async fn get_recently_played(
        &self,
        token: &AccessToken,
        hide_explicit: bool,
        limit: usize,
    ) -> SpotifyResult<Vec<Track>> {
        let fetch_limit = fetch_quantity(hide_explicit, limit);

        debug!(limit, fetch_limit, "Fetching recently played tracks from Spotify");

        let response = self
            .make_request(
                &self.config.recently_played_url(),
                token,
                &[("limit", fetch_limit.to_string())],
            )
            .await?;
        let text = Self::response_text(response).await?;
        let raw: RecentlyPlayedResponse = serde_json::from_str(&text)?;

        let tracks: Vec<Track> = raw
            .items
            .into_iter()
            .filter_map(|item| Track::from_raw(item.track))
            .filter(|track| !hide_explicit || !track.explicit)
            .take(limit)
            .collect();

        debug!(result_count = tracks.len(), "Fetched recently played tracks");

        Ok(tracks)
    }

    /// Fetch the user's top tracks
    ///
    /// Same filter-then-truncate rule as recently played.
    #[instrument(skip(self, token))]
    pub async fn get_top_tracks(
        &self,
        token: &AccessToken,
        hide_explicit: bool,
        limit: usize,
    ) -> SpotifyResult<Vec<Track>> {
        let fetch_limit = fetch_quantity(hide_explicit, limit);

        debug!(limit, fetch_limit, "Fetching top tracks from Spotify");

        let response = self
            .make_request(
                &self.config.top_tracks_url(),
                token,
                &[("limit", fetch_limit.to_string())],
            )
            .await?;
        let text = Self::response_text(response).await?;
        let raw: TopTracksResponse = serde_json::from_str(&text)?;

        let tracks: Vec<Track> = raw
            .items
            .into_iter()
            .filter_map(Track::from_raw)
            .filter(|track| !hide_explicit || !track.explicit)
            .take(limit)
            .collect();

        debug!(result_count = tracks.len(), "Fetched top tracks");

        Ok(tracks)
    }

    /// Fetch the user's top artists
    ///
    /// Artists have no explicit-content dimension, so exactly `limit` items
    /// are requested.
    #[instrument(skip(self, token))]
    pub async fn get_top_artists(
        &self,
        token: &AccessToken,
        limit: usize,
    ) -> SpotifyResult<Vec<Artist>> {
        debug!(limit, "Fetching top artists from Spotify");

        let response = self
            .make_request(
                &self.config.top_artists_url(),
                token,
                &[("limit", limit.to_string())],
            )
            .await?;
        let text = Self::response_text(response).await?;
        let raw: TopArtistsResponse = serde_json::from_str(&text)?;

        let artists: Vec<Artist> = raw
            .items
            .into_iter()
            .filter_map(Artist::from_raw)
            .take(limit)
            .collect();

        debug!(result_count = artists.len(), "Fetched top artists");

        Ok(artists)
    }
}

/// The quantity to request from upstream for a filterable track listing
fn fetch_quantity(hide_explicit: bool, limit: usize) -> usize {
    if hide_explicit {
        FILTER_OVERFETCH_LIMIT
    } else {
        limit
    }
}

/// Map a non-2xx response to an error, surfacing the upstream message
fn api_error(status: StatusCode, body: &str) -> SpotifyError {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => {
            let mut text = body.trim().to_string();
            if text.is_empty() {
                text = status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string();
            }
            text.truncate(MAX_ERROR_BODY_SIZE);
            text
        }
    };

    SpotifyError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let config = SpotifyConfig::default();
        assert!(SpotifyClient::new(&config).is_ok());
    }

    #[test]
    fn test_client_debug_shows_base_url_only() {
        let client = SpotifyClient::new(&SpotifyConfig::default()).unwrap();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("api.spotify.com"));
    }

    #[test]
    fn test_access_token_debug_redacts_secret() {
        let token = AccessToken::new("very-secret-bearer");
        let debug_str = format!("{:?}", token);
        assert!(!debug_str.contains("very-secret-bearer"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_fetch_quantity_overfetches_only_under_filtering() {
        assert_eq!(fetch_quantity(true, 5), FILTER_OVERFETCH_LIMIT);
        assert_eq!(fetch_quantity(false, 5), 5);
        // Fixed, not scaled: stays at the constant even past it
        assert_eq!(fetch_quantity(true, 50), FILTER_OVERFETCH_LIMIT);
    }

    #[test]
    fn test_api_error_surfaces_upstream_message() {
        let err = api_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"status":401,"message":"The access token expired"}}"#,
        );
        match err {
            SpotifyError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "The access token expired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_canonical_reason() {
        let err = api_error(StatusCode::BAD_GATEWAY, "");
        match err {
            SpotifyError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(SpotifyError::Timeout.is_retryable());
        assert!(SpotifyError::RateLimited.is_retryable());
        assert!(SpotifyError::Api {
            status: 502,
            message: "Bad Gateway".to_string()
        }
        .is_retryable());
        assert!(!SpotifyError::Api {
            status: 401,
            message: "expired".to_string()
        }
        .is_retryable());
    }
}
