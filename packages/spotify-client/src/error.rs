//! Spotify Web API error types

use thiserror::Error;

/// Spotify Web API client errors
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse Spotify response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Spotify returned a non-2xx response; `message` carries the upstream
    /// error text when the body was parseable
    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by Spotify
    #[error("Rate limited by Spotify API")]
    RateLimited,

    /// Request timeout
    #[error("Request to Spotify timed out")]
    Timeout,
}

impl SpotifyError {
    /// Check if this error is a transient failure
    ///
    /// The client itself never retries; this exists so callers that layer a
    /// retry policy on top can tell transient failures (timeouts, rate
    /// limiting, connect faults, 5xx) from permanent ones.
    pub fn is_retryable(&self) -> bool {
        match self {
            SpotifyError::Timeout | SpotifyError::RateLimited => true,
            SpotifyError::Http(e) => e.is_timeout() || e.is_connect(),
            SpotifyError::Api { status, .. } => (500..600).contains(status),
            SpotifyError::Parse(_) => false,
        }
    }
}

/// Result type for Spotify operations
pub type SpotifyResult<T> = Result<T, SpotifyError>;
