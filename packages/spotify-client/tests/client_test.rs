//! Integration tests for the Spotify client against a mock upstream

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use tempocard_spotify_client::{AccessToken, SpotifyClient, SpotifyError};
use tempocard_test_utils::{artist_json, track_json, MockSpotifyServer};

fn client_for(server: &MockSpotifyServer) -> SpotifyClient {
    SpotifyClient::new(&server.config()).expect("client builds")
}

fn token() -> AccessToken {
    AccessToken::new("test-token")
}

#[tokio::test]
async fn test_profile_request_sends_bearer_token() {
    let server = MockSpotifyServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u1",
            "display_name": "Alice"
        })))
        .expect(1)
        .mount(server.inner())
        .await;

    let profile = client_for(&server).get_profile(&token()).await.unwrap();
    assert_eq!(profile.id, "u1");
    assert_eq!(profile.display_name, "Alice");
}

#[tokio::test]
async fn test_profile_null_display_name_becomes_empty() {
    let server = MockSpotifyServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u1",
            "display_name": null
        })))
        .mount(server.inner())
        .await;

    let profile = client_for(&server).get_profile(&token()).await.unwrap();
    assert_eq!(profile.display_name, "");
}

#[tokio::test]
async fn test_non_2xx_surfaces_upstream_error_message() {
    let server = MockSpotifyServer::start().await;
    server
        .mock_api_error("/me", 403, "Insufficient client scope")
        .await;

    let result = client_for(&server).get_profile(&token()).await;
    match result {
        Err(SpotifyError::Api { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Insufficient client scope");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_429_maps_to_rate_limited() {
    let server = MockSpotifyServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(429))
        .mount(server.inner())
        .await;

    let result = client_for(&server).get_profile(&token()).await;
    assert!(matches!(result, Err(SpotifyError::RateLimited)));
}

#[tokio::test]
async fn test_now_playing_204_is_none() {
    let server = MockSpotifyServer::start().await;
    server.mock_now_playing_nothing().await;

    let playing = client_for(&server)
        .get_now_playing(&token(), false)
        .await
        .unwrap();
    assert_eq!(playing, None);
}

#[tokio::test]
async fn test_top_tracks_overfetch_quantity_is_requested_under_filtering() {
    let tracks: Vec<_> = (0..20).map(|i| track_json(&format!("T{i}"), false)).collect();

    let server = MockSpotifyServer::start().await;
    // Only matches limit=20; a limit=3 request would 404
    server.mock_top_tracks_for_limit(&tracks, 20).await;

    let result = client_for(&server)
        .get_top_tracks(&token(), true, 3)
        .await
        .unwrap();
    assert_eq!(result.len(), 3);
}

#[tokio::test]
async fn test_top_artists_request_exactly_limit() {
    let artists: Vec<_> = (0..7).map(|i| artist_json(&format!("A{i}"))).collect();

    let server = MockSpotifyServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/top/artists"))
        .and(query_param("limit", "7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "items": artists })),
        )
        .mount(server.inner())
        .await;

    let result = client_for(&server)
        .get_top_artists(&token(), 7)
        .await
        .unwrap();
    assert_eq!(result.len(), 7);
    assert_eq!(result[0].name, "A0");
}
