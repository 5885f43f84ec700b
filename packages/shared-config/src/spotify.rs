//! Spotify Web API configuration types

use crate::{get_env_or_default, parse_env, ConfigResult};

/// Spotify Web API configuration
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    /// Base URL of the Spotify Web API
    pub api_base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl SpotifyConfig {
    /// Load Spotify configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            api_base_url: get_env_or_default("SPOTIFY_API_BASE_URL", "https://api.spotify.com/v1"),
            timeout_secs: parse_env("SPOTIFY_TIMEOUT", 10)?,
            connect_timeout_secs: parse_env("SPOTIFY_CONNECT_TIMEOUT", 5)?,
        })
    }

    /// Create a configuration with a custom base URL (useful for testing)
    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self {
            api_base_url: url.into(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }

    /// Get the full URL for the current user's profile endpoint
    pub fn profile_url(&self) -> String {
        format!("{}/me", self.api_base_url.trim_end_matches('/'))
    }

    /// Get the full URL for the currently-playing endpoint
    pub fn now_playing_url(&self) -> String {
        format!(
            "{}/me/player/currently-playing",
            self.api_base_url.trim_end_matches('/')
        )
    }

    /// Get the full URL for the recently-played endpoint
    pub fn recently_played_url(&self) -> String {
        format!(
            "{}/me/player/recently-played",
            self.api_base_url.trim_end_matches('/')
        )
    }

    /// Get the full URL for the top-tracks endpoint
    pub fn top_tracks_url(&self) -> String {
        format!("{}/me/top/tracks", self.api_base_url.trim_end_matches('/'))
    }

    /// Get the full URL for the top-artists endpoint
    pub fn top_artists_url(&self) -> String {
        format!("{}/me/top/artists", self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.spotify.com/v1".to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SpotifyConfig::default();
        assert_eq!(config.api_base_url, "https://api.spotify.com/v1");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_with_base_url() {
        let config = SpotifyConfig::with_base_url("http://localhost:9000");
        assert_eq!(config.api_base_url, "http://localhost:9000");
    }

    #[test]
    fn test_endpoint_urls() {
        let config = SpotifyConfig::default();
        assert_eq!(config.profile_url(), "https://api.spotify.com/v1/me");
        assert_eq!(
            config.now_playing_url(),
            "https://api.spotify.com/v1/me/player/currently-playing"
        );
        assert_eq!(
            config.recently_played_url(),
            "https://api.spotify.com/v1/me/player/recently-played"
        );
        assert_eq!(
            config.top_tracks_url(),
            "https://api.spotify.com/v1/me/top/tracks"
        );
        assert_eq!(
            config.top_artists_url(),
            "https://api.spotify.com/v1/me/top/artists"
        );
    }

    #[test]
    fn test_endpoint_urls_with_trailing_slash() {
        let config = SpotifyConfig::with_base_url("http://localhost:9000/");
        assert_eq!(config.profile_url(), "http://localhost:9000/me");
    }
}
