//! Spotify Web API response models
//!
//! Raw response shapes are deserialized as Spotify sends them and converted
//! into the normalized display records. Conversion refuses to fabricate: an
//! upstream item without a name or an external URL yields no record at all,
//! and optional fields fall back to empty strings only when upstream itself
//! omits them.

use serde::{Deserialize, Serialize};

/// Index into Spotify's ordered image list used for display art
///
/// Spotify returns album and artist images in three standard sizes, largest
/// first; index 2 is the smallest. Upstream does not guarantee three entries,
/// so conversion falls back to an empty URL when the slot is absent.
pub const DISPLAY_IMAGE_INDEX: usize = 2;

/// A Spotify user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Spotify user id
    pub id: String,
    /// Display name; empty when the user has not set one
    pub display_name: String,
}

/// A normalized track, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,
    /// Comma-joined contributing artist names, in upstream order
    pub artist: String,
    /// Album title
    pub album_title: String,
    /// Album art URL (smallest standard size)
    pub album_image_url: String,
    /// Whether Spotify marks the track explicit
    pub explicit: bool,
    /// Link to the track on Spotify
    pub url: String,
}

/// A normalized artist, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Artist name
    pub name: String,
    /// Artist image URL (smallest standard size)
    pub image_url: String,
    /// Link to the artist on Spotify
    pub url: String,
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct RawProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<RawProfile> for UserProfile {
    fn from(raw: RawProfile) -> Self {
        Self {
            id: raw.id,
            display_name: raw.display_name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NowPlayingResponse {
    #[serde(default)]
    pub is_playing: bool,
    pub item: Option<RawTrack>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecentlyPlayedResponse {
    pub items: Vec<RawPlayHistoryItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlayHistoryItem {
    pub track: RawTrack,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopTracksResponse {
    pub items: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopArtistsResponse {
    pub items: Vec<RawArtist>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    pub name: Option<String>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub artists: Vec<RawArtistRef>,
    pub album: Option<RawAlbum>,
    #[serde(default)]
    pub external_urls: RawExternalUrls,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtistRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawImage {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtist {
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<RawImage>,
    #[serde(default)]
    pub external_urls: RawExternalUrls,
}

fn display_image_url(images: &[RawImage]) -> String {
    images
        .get(DISPLAY_IMAGE_INDEX)
        .map(|image| image.url.clone())
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl Track {
    /// Convert a raw track, or `None` when it lacks a name or external URL
    pub(crate) fn from_raw(raw: RawTrack) -> Option<Self> {
        let title = non_empty(raw.name)?;
        let url = non_empty(raw.external_urls.spotify)?;

        let artist = raw
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let (album_title, album_image_url) = match raw.album {
            Some(album) => (album.name, display_image_url(&album.images)),
            None => (String::new(), String::new()),
        };

        Some(Self {
            title,
            artist,
            album_title,
            album_image_url,
            explicit: raw.explicit,
            url,
        })
    }
}

impl Artist {
    /// Convert a raw artist, or `None` when it lacks a name or external URL
    pub(crate) fn from_raw(raw: RawArtist) -> Option<Self> {
        let name = non_empty(raw.name)?;
        let url = non_empty(raw.external_urls.spotify)?;
        let image_url = display_image_url(&raw.images);

        Some(Self {
            name,
            image_url,
            url,
        })
    }
}

/// Spotify API error response body
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[allow(dead_code)] // Required for serde deserialization, not used in code
    pub status: Option<u16>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_track(name: Option<&str>, spotify_url: Option<&str>) -> RawTrack {
        RawTrack {
            name: name.map(String::from),
            explicit: false,
            artists: vec![
                RawArtistRef {
                    name: "First".to_string(),
                },
                RawArtistRef {
                    name: "Second".to_string(),
                },
            ],
            album: Some(RawAlbum {
                name: "An Album".to_string(),
                images: vec![
                    RawImage {
                        url: "https://img/640".to_string(),
                    },
                    RawImage {
                        url: "https://img/300".to_string(),
                    },
                    RawImage {
                        url: "https://img/64".to_string(),
                    },
                ],
            }),
            external_urls: RawExternalUrls {
                spotify: spotify_url.map(String::from),
            },
        }
    }

    #[test]
    fn test_track_joins_artists_in_order() {
        let track = Track::from_raw(raw_track(Some("Song"), Some("https://open/track"))).unwrap();
        assert_eq!(track.artist, "First, Second");
    }

    #[test]
    fn test_track_uses_smallest_image() {
        let track = Track::from_raw(raw_track(Some("Song"), Some("https://open/track"))).unwrap();
        assert_eq!(track.album_image_url, "https://img/64");
    }

    #[test]
    fn test_track_image_fallback_when_fewer_than_three() {
        let mut raw = raw_track(Some("Song"), Some("https://open/track"));
        raw.album.as_mut().unwrap().images.truncate(2);
        let track = Track::from_raw(raw).unwrap();
        assert_eq!(track.album_image_url, "");
    }

    #[test]
    fn test_track_without_name_is_skipped() {
        assert!(Track::from_raw(raw_track(None, Some("https://open/track"))).is_none());
    }

    #[test]
    fn test_track_without_external_url_is_skipped() {
        assert!(Track::from_raw(raw_track(Some("Song"), None)).is_none());
    }

    #[test]
    fn test_track_without_album_gets_empty_fields() {
        let mut raw = raw_track(Some("Song"), Some("https://open/track"));
        raw.album = None;
        let track = Track::from_raw(raw).unwrap();
        assert_eq!(track.album_title, "");
        assert_eq!(track.album_image_url, "");
    }

    #[test]
    fn test_artist_conversion() {
        let raw = RawArtist {
            name: Some("Someone".to_string()),
            images: vec![
                RawImage {
                    url: "https://img/640".to_string(),
                },
                RawImage {
                    url: "https://img/300".to_string(),
                },
                RawImage {
                    url: "https://img/160".to_string(),
                },
            ],
            external_urls: RawExternalUrls {
                spotify: Some("https://open/artist".to_string()),
            },
        };

        let artist = Artist::from_raw(raw).unwrap();
        assert_eq!(artist.name, "Someone");
        assert_eq!(artist.image_url, "https://img/160");
        assert_eq!(artist.url, "https://open/artist");
    }

    #[test]
    fn test_artist_without_url_is_skipped() {
        let raw = RawArtist {
            name: Some("Someone".to_string()),
            images: vec![],
            external_urls: RawExternalUrls { spotify: None },
        };
        assert!(Artist::from_raw(raw).is_none());
    }

    #[test]
    fn test_profile_missing_display_name_becomes_empty() {
        let profile: UserProfile = UserProfile::from(RawProfile {
            id: "u1".to_string(),
            display_name: None,
        });
        assert_eq!(profile.display_name, "");
    }

    #[test]
    fn test_error_response_parsing() {
        let body = r#"{"error":{"status":401,"message":"The access token expired"}}"#;
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "The access token expired");
    }
}
