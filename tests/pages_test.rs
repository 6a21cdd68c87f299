mod common;

use axum::{
    Form,
    body::to_bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use common::{FakeTransport, catalog};
use serde_json::json;
use tempfile::TempDir;
use tunefeed::{
    api::{self, SearchForm},
    config::AudioFallback,
    management::UserManager,
    server::AppState,
    upstream::Endpoint,
};

fn state_with(dir: &TempDir, transport: FakeTransport) -> AppState<FakeTransport> {
    let users = UserManager::new(dir.path().join("users.json"));
    AppState::new(catalog(transport), users)
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn track_without_audio() -> FakeTransport {
    FakeTransport::new().with_json(
        Endpoint::TrackMetadata {
            track_id: "T1".to_string(),
        },
        json!({ "name": "Song", "artists": [{ "name": "Artist" }] }),
    )
}

#[tokio::test]
async fn test_search_renders_when_upstream_fails() {
    let dir = TempDir::new().unwrap();
    let state = state_with(&dir, FakeTransport::new());

    let response = api::search(
        State(state),
        HeaderMap::new(),
        Form(SearchForm {
            search_query: "song".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"0 results for "song""#));
    assert!(html.contains(r#"name="search_query""#));
}

#[tokio::test]
async fn test_search_form_renders() {
    let dir = TempDir::new().unwrap();
    let state = state_with(&dir, FakeTransport::new());

    let response = api::search_form(State(state), HeaderMap::new()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"action="/search""#));
}

#[tokio::test]
async fn test_music_renders_when_upstream_fails() {
    let dir = TempDir::new().unwrap();
    let state = state_with(&dir, FakeTransport::new());

    let response = api::music(State(state), Path("T1".to_string()), HeaderMap::new()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("This track is unavailable right now.")
    );
}

#[tokio::test]
async fn test_music_without_audio_uses_fallback_policy() {
    let dir = TempDir::new().unwrap();

    let state = state_with(&dir, track_without_audio());
    let response = api::music(State(state), Path("T1".to_string()), HeaderMap::new()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>Song</h1>"));
    assert!(html.contains("Preview unavailable"));

    let state = state_with(&dir, track_without_audio())
        .with_audio_fallback(AudioFallback::Text("No sample for this one".to_string()));
    let response = api::music(State(state), Path("T1".to_string()), HeaderMap::new()).await;
    let html = body_text(response).await;
    assert!(html.contains("No sample for this one"));
    assert!(!html.contains("Preview unavailable"));

    let state = state_with(&dir, track_without_audio()).with_audio_fallback(AudioFallback::Hidden);
    let response = api::music(State(state), Path("T1".to_string()), HeaderMap::new()).await;
    let html = body_text(response).await;
    assert!(!html.contains("no-audio"));
    assert!(!html.contains("<audio"));
}

#[tokio::test]
async fn test_profile_renders_when_upstream_fails() {
    let dir = TempDir::new().unwrap();
    let state = state_with(&dir, FakeTransport::new());

    let response = api::profile(State(state), Path("A1".to_string()), HeaderMap::new()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("This artist is unavailable right now.")
    );
}

#[tokio::test]
async fn test_health() {
    let body = api::health().await.0;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "tunefeed");
}
