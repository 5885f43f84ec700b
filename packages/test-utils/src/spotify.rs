//! Mock Spotify Web API server for testing the data-access layer
//!
//! Provides a [`MockSpotifyServer`] that simulates the five Spotify
//! resources (profile, currently-playing, recently-played, top tracks, top
//! artists) without a real upstream, plus JSON fixture builders matching
//! Spotify's raw response shapes.

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tempocard_shared_config::SpotifyConfig;

/// Build a raw Spotify track object as the API would return it
///
/// Three image sizes are always present, largest first, so the smallest-size
/// slot resolves to `https://images.test/64/{slug}.jpg`.
pub fn track_json(name: &str, explicit: bool) -> Value {
    let slug = slugify(name);
    json!({
        "name": name,
        "explicit": explicit,
        "artists": [
            { "name": "Artist A" },
            { "name": "Artist B" }
        ],
        "album": {
            "name": format!("{name} (Album)"),
            "images": [
                { "url": format!("https://images.test/640/{slug}.jpg") },
                { "url": format!("https://images.test/300/{slug}.jpg") },
                { "url": format!("https://images.test/64/{slug}.jpg") }
            ]
        },
        "external_urls": {
            "spotify": format!("https://open.spotify.com/track/{slug}")
        }
    })
}

/// Build a raw track object missing its external URL
///
/// Normalization must skip such items rather than fabricate a link.
pub fn track_json_without_url(name: &str) -> Value {
    let mut track = track_json(name, false);
    track["external_urls"] = json!({});
    track
}

/// Build a raw Spotify artist object as the API would return it
pub fn artist_json(name: &str) -> Value {
    let slug = slugify(name);
    json!({
        "name": name,
        "images": [
            { "url": format!("https://images.test/640/{slug}.jpg") },
            { "url": format!("https://images.test/320/{slug}.jpg") },
            { "url": format!("https://images.test/160/{slug}.jpg") }
        ],
        "external_urls": {
            "spotify": format!("https://open.spotify.com/artist/{slug}")
        }
    })
}

fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Mock Spotify Web API server
///
/// Wraps a [`wiremock::MockServer`] with convenience methods for mounting
/// the responses the data-access layer consumes. The `*_expect` variants pin
/// an exact call count, verified when the server is dropped; that is how
/// tests assert "the second request made zero upstream calls".
pub struct MockSpotifyServer {
    server: MockServer,
}

impl MockSpotifyServer {
    /// Start a new mock Spotify server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Build a [`SpotifyConfig`] aimed at this server
    pub fn config(&self) -> SpotifyConfig {
        SpotifyConfig::with_base_url(self.url())
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Mount a successful profile response
    pub async fn mock_profile(&self, id: &str, display_name: &str) {
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "display_name": display_name
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a successful profile response with an exact expected call count
    pub async fn mock_profile_expect(&self, id: &str, display_name: &str, calls: u64) {
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "display_name": display_name
            })))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Mount an error response for a resource path
    ///
    /// The body uses Spotify's error envelope so clients can surface the
    /// upstream message.
    pub async fn mock_api_error(&self, resource_path: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(resource_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {
                    "status": status,
                    "message": message
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a currently-playing response with an actively playing item
    pub async fn mock_now_playing_track(&self, track: Value) {
        self.mount_now_playing(json!({ "is_playing": true, "item": track }))
            .await;
    }

    /// Mount a currently-playing response for a paused item
    pub async fn mock_now_playing_paused(&self, track: Value) {
        self.mount_now_playing(json!({ "is_playing": false, "item": track }))
            .await;
    }

    /// Mount a currently-playing response that reports no item
    pub async fn mock_now_playing_no_item(&self) {
        self.mount_now_playing(json!({ "is_playing": true, "item": null }))
            .await;
    }

    /// Mount the empty 204 Spotify sends when there is no playback session
    pub async fn mock_now_playing_nothing(&self) {
        Mock::given(method("GET"))
            .and(path("/me/player/currently-playing"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    async fn mount_now_playing(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/me/player/currently-playing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a recently-played response
    pub async fn mock_recently_played(&self, tracks: &[Value]) {
        Mock::given(method("GET"))
            .and(path("/me/player/recently-played"))
            .respond_with(ResponseTemplate::new(200).set_body_json(play_history_body(tracks)))
            .mount(&self.server)
            .await;
    }

    /// Mount a recently-played response that only matches a specific `limit`
    /// query parameter
    ///
    /// Used to pin the exact quantity the client requested from upstream.
    pub async fn mock_recently_played_for_limit(&self, tracks: &[Value], limit: usize) {
        Mock::given(method("GET"))
            .and(path("/me/player/recently-played"))
            .and(query_param("limit", limit.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(play_history_body(tracks)))
            .mount(&self.server)
            .await;
    }

    /// Mount a top-tracks response
    pub async fn mock_top_tracks(&self, tracks: &[Value]) {
        Mock::given(method("GET"))
            .and(path("/me/top/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(items_body(tracks)))
            .mount(&self.server)
            .await;
    }

    /// Mount a top-tracks response with an exact expected call count
    pub async fn mock_top_tracks_expect(&self, tracks: &[Value], calls: u64) {
        Mock::given(method("GET"))
            .and(path("/me/top/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(items_body(tracks)))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Mount a top-tracks response that only matches a specific `limit`
    pub async fn mock_top_tracks_for_limit(&self, tracks: &[Value], limit: usize) {
        Mock::given(method("GET"))
            .and(path("/me/top/tracks"))
            .and(query_param("limit", limit.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(items_body(tracks)))
            .mount(&self.server)
            .await;
    }

    /// Mount a top-artists response
    pub async fn mock_top_artists(&self, artists: &[Value]) {
        Mock::given(method("GET"))
            .and(path("/me/top/artists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(items_body(artists)))
            .mount(&self.server)
            .await;
    }

    /// Mount a top-artists response with an exact expected call count
    pub async fn mock_top_artists_expect(&self, artists: &[Value], calls: u64) {
        Mock::given(method("GET"))
            .and(path("/me/top/artists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(items_body(artists)))
            .expect(calls)
            .mount(&self.server)
            .await;
    }
}

fn items_body(items: &[Value]) -> Value {
    json!({ "items": items })
}

fn play_history_body(tracks: &[Value]) -> Value {
    let items: Vec<Value> = tracks.iter().map(|t| json!({ "track": t })).collect();
    json!({ "items": items })
}
