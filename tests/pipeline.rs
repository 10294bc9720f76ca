// End-to-end recommendation pipeline against mocked provider APIs

use std::sync::Arc;

use plexmuse_lib::ai::{ModelRouter, ProviderCredentials, ProviderRouter, Recommender};
use plexmuse_lib::error::{RecommendationError, Stage};
use plexmuse_lib::models::{Album, Artist, Track, TrackCatalog, TrackPick};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
    }))
}

fn recommender(openai: &MockServer, anthropic: &MockServer) -> Recommender {
    let credentials = ProviderCredentials::new(Some("sk-test".into()), Some("sk-ant-test".into()))
        .with_base_urls(openai.uri(), anthropic.uri());
    let backend = ProviderRouter::new(&credentials, reqwest::Client::new());
    Recommender::new(Arc::new(backend), ModelRouter::new())
}

fn catalog() -> Vec<Artist> {
    vec![
        Artist::new("1", "Artist 1", &["Rock"]),
        Artist::new("2", "Artist 2", &["Pop"]),
    ]
}

#[tokio::test]
async fn test_rock_playlist_selects_artist_through_openai() {
    let openai = MockServer::start().await;
    let anthropic = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"model\":\"gpt-4\""))
        .and(body_string_contains("Artist 1 - Rock"))
        .and(body_string_contains("Artist 2 - Pop"))
        .and(body_string_contains("Create a playlist for: rock playlist"))
        .respond_with(openai_reply(r#"{"artists": ["Artist 1"]}"#))
        .expect(1)
        .mount(&openai)
        .await;

    let selected = recommender(&openai, &anthropic)
        .select_artists("rock playlist", &catalog(), "gpt-4")
        .await
        .unwrap();

    assert_eq!(selected, vec!["Artist 1"]);
}

#[tokio::test]
async fn test_claude_alias_is_routed_to_anthropic() {
    let openai = MockServer::start().await;
    let anthropic = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_string_contains("\"model\":\"claude-3-5-sonnet-latest\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": r#"{"tracks": [{"artist": "Artist 1", "title": "Song 1"}]}"#}]
        })))
        .expect(1)
        .mount(&anthropic)
        .await;

    let mut tracks = TrackCatalog::new();
    tracks.insert(
        "Artist 1",
        vec![Album {
            name: "Album 1".into(),
            year: Some(2001),
            tracks: vec![Track::titled("Song 1")],
        }],
    );

    let picks = recommender(&openai, &anthropic)
        .select_tracks("quiet morning", &tracks, "claude")
        .await
        .unwrap();

    assert_eq!(picks, vec![TrackPick::new("Artist 1", "Song 1")]);
}

#[tokio::test]
async fn test_provider_error_surfaces_as_transport_failure() {
    let openai = MockServer::start().await;
    let anthropic = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&openai)
        .await;

    let err = recommender(&openai, &anthropic)
        .select_artists("rock playlist", &catalog(), "gpt-4")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RecommendationError::Transport {
            stage: Stage::ArtistSelection,
            ..
        }
    ));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_empty_selection_is_not_a_valid_answer() {
    let openai = MockServer::start().await;
    let anthropic = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(openai_reply(r#"{"artists": []}"#))
        .mount(&openai)
        .await;

    let err = recommender(&openai, &anthropic)
        .get_recommendations("anything", &catalog(), "gpt-4")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RecommendationError::EmptyResult {
            stage: Stage::ArtistSelection,
            field: "artists",
        }
    ));
}
