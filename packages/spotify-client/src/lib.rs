//! Spotify Web API client for tempocard
//!
//! This crate fetches the five data classes a music card displays and
//! normalizes them into display-ready records:
//! - the user's profile
//! - the currently playing track
//! - recently played tracks
//! - top tracks
//! - top artists
//!
//! # Example
//!
//! ```rust,no_run
//! use tempocard_shared_config::SpotifyConfig;
//! use tempocard_spotify_client::{AccessToken, SpotifyClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpotifyClient::new(&SpotifyConfig::default())?;
//! let token = AccessToken::new("bearer-token-from-auth-flow");
//!
//! if let Some(track) = client.get_now_playing(&token, false).await? {
//!     println!("{} by {}", track.title, track.artist);
//! }
//!
//! let top = client.get_top_tracks(&token, true, 10).await?;
//! for track in top {
//!     println!("{}", track.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Requests are bounded by the timeouts in [`SpotifyConfig`] and are never
//! retried here; retry policy belongs to the caller.
//!
//! [`SpotifyConfig`]: tempocard_shared_config::SpotifyConfig

mod client;
mod error;
mod models;

pub use client::{AccessToken, SpotifyClient, FILTER_OVERFETCH_LIMIT};
pub use error::{SpotifyError, SpotifyResult};
pub use models::{Artist, Track, UserProfile, DISPLAY_IMAGE_INDEX};
