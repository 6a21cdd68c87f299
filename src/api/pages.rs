use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{info, server::AppState, upstream::Transport, utils, views};

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_query: String,
}

/// `GET /`, signed-in users only.
pub async fn home<T: Transport>(State(state): State<AppState<T>>, headers: HeaderMap) -> Response {
    let token = utils::session_token(&headers);
    let Some(user) = state.sessions.user(token.as_deref()).await else {
        return Redirect::to("/login").into_response();
    };

    info!("home feed for {}", user);
    let feed = state.catalog.home_feed().await;
    let flashes = state.sessions.take_flashes(token.as_deref()).await;
    views::home_page(Some(&user), &flashes, &feed).into_response()
}

/// `GET /search`
pub async fn search_form<T: Transport>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
) -> Response {
    let token = utils::session_token(&headers);
    let user = state.sessions.user(token.as_deref()).await;
    let flashes = state.sessions.take_flashes(token.as_deref()).await;
    views::search_page(user.as_deref(), &flashes, None).into_response()
}

/// `POST /search`
pub async fn search<T: Transport>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Response {
    let token = utils::session_token(&headers);
    let user = state.sessions.user(token.as_deref()).await;

    info!("search '{}'", form.search_query);
    let results = state.catalog.search(&form.search_query).await;
    let flashes = state.sessions.take_flashes(token.as_deref()).await;
    views::search_page(user.as_deref(), &flashes, Some(&results)).into_response()
}

/// `GET /music/{track_id}`
pub async fn music<T: Transport>(
    State(state): State<AppState<T>>,
    Path(track_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let token = utils::session_token(&headers);
    let user = state.sessions.user(token.as_deref()).await;

    info!("track {}", track_id);
    let detail = state.catalog.track_detail(&track_id).await;
    let flashes = state.sessions.take_flashes(token.as_deref()).await;
    views::music_page(
        user.as_deref(),
        &flashes,
        detail.as_ref(),
        &state.audio_fallback,
    ).into_response()
}

/// `GET /profile/{artist_id}`
pub async fn profile<T: Transport>(
    State(state): State<AppState<T>>,
    Path(artist_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let token = utils::session_token(&headers);
    let user = state.sessions.user(token.as_deref()).await;

    info!("artist {}", artist_id);
    let profile = state.catalog.artist_profile(&artist_id).await;
    let flashes = state.sessions.take_flashes(token.as_deref()).await;
    views::profile_page(user.as_deref(), &flashes, profile.as_ref()).into_response()
}
