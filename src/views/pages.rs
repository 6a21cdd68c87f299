use axum::response::Html;

use crate::{
    config::AudioFallback,
    types::{ArtistProfile, HomeFeed, SearchResults, TrackDetail, TrackSummary},
};

use super::{escape, image_tag, layout};

fn track_card(track: &TrackSummary) -> String {
    let cover = track
        .cover_url
        .as_deref()
        .map(|url| image_tag(url, &track.track_name))
        .unwrap_or_default();
    format!(
        r#"<li><a href="/music/{id}">{cover}<strong>{name}</strong> <span>{artist}</span></a></li>"#,
        id = escape(&track.id),
        cover = cover,
        name = escape(&track.track_name),
        artist = escape(track.artist_name.as_deref().unwrap_or_default()),
    )
}

pub fn home_page(user: Option<&str>, flashes: &[String], feed: &HomeFeed) -> Html<String> {
    let artists: String = feed
        .artists
        .iter()
        .map(|a| {
            format!(
                r#"<li><a href="/profile/{id}">{avatar}<span>{name}</span></a></li>"#,
                id = escape(&a.id),
                avatar = image_tag(&a.avatar_url, &a.name),
                name = escape(&a.name),
            )
        })
        .collect();

    let windows: String = feed
        .track_windows
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| {
            let cards: String = w.iter().map(track_card).collect();
            format!(r#"<ol class="tracks">{}</ol>"#, cards)
        })
        .collect();

    let body = format!(
        r#"<h1>Top artists</h1>
<ul class="artists">{artists}</ul>
<h1>Top tracks</h1>
{windows}"#
    );
    layout("Home", user, flashes, &body)
}

pub fn music_page(
    user: Option<&str>,
    flashes: &[String],
    detail: Option<&TrackDetail>,
    audio_fallback: &AudioFallback,
) -> Html<String> {
    let Some(detail) = detail else {
        return layout(
            "Track",
            user,
            flashes,
            "<p>This track is unavailable right now.</p>",
        );
    };

    let player = match detail.audio_url() {
        Some(url) => format!(
            r#"<audio controls src="{}"></audio> <span class="duration">{}</span>"#,
            escape(url),
            escape(detail.duration_text().unwrap_or_default())
        ),
        None => audio_fallback
            .notice()
            .map(|text| format!(r#"<p class="no-audio">{}</p>"#, escape(text)))
            .unwrap_or_default(),
    };

    let body = format!(
        r#"<article class="track">
{image}
<h1>{name}</h1>
<h2>{artist}</h2>
{player}
</article>"#,
        image = image_tag(&detail.track_image, &detail.track_name),
        name = escape(&detail.track_name),
        artist = escape(&detail.artist_name),
        player = player,
    );
    layout(&detail.track_name, user, flashes, &body)
}

const SEARCH_FORM: &str = r#"<form method="post" action="/search">
<input type="text" name="search_query" placeholder="Search tracks">
<button type="submit">Search</button>
</form>"#;

pub fn search_page(user: Option<&str>, flashes: &[String], results: Option<&SearchResults>) -> Html<String> {
    let Some(results) = results else {
        return layout("Search", user, flashes, SEARCH_FORM);
    };

    let rows: String = results
        .tracks
        .iter()
        .map(|hit| {
            format!(
                r#"<li><a href="/music/{id}">{image}<strong>{name}</strong> <span>{artist}</span> <span class="duration">{duration}</span></a></li>"#,
                id = escape(&hit.id),
                image = image_tag(&hit.track_image, &hit.track_name),
                name = escape(&hit.track_name),
                artist = escape(hit.artist_name.as_deref().unwrap_or_default()),
                duration = escape(hit.duration_text.as_deref().unwrap_or_default()),
            )
        })
        .collect();

    let body = format!(
        r#"{form}
<p>{count} results for "{query}"</p>
<ol class="results">{rows}</ol>"#,
        form = SEARCH_FORM,
        count = results.total_count,
        query = escape(&results.query),
        rows = rows,
    );
    layout("Search", user, flashes, &body)
}

pub fn profile_page(user: Option<&str>, flashes: &[String], profile: Option<&ArtistProfile>) -> Html<String> {
    let Some(profile) = profile else {
        return layout(
            "Artist",
            user,
            flashes,
            "<p>This artist is unavailable right now.</p>",
        );
    };

    let tracks: String = profile
        .top_tracks
        .iter()
        .map(|t| {
            format!(
                r#"<li><a href="/music/{id}">{image}<strong>{name}</strong></a> <span class="duration">{duration}</span> <span class="plays">{plays} plays</span></li>"#,
                id = escape(&t.id),
                image = image_tag(&t.track_image, &t.name),
                name = escape(&t.name),
                duration = escape(t.duration_text.as_deref().unwrap_or_default()),
                plays = t.play_count,
            )
        })
        .collect();

    let body = format!(
        r#"<header class="artist">
{header}
<h1>{name}</h1>
<p>{listeners} monthly listeners</p>
</header>
<ol class="top-tracks">{tracks}</ol>"#,
        header = image_tag(&profile.header_url, &profile.name),
        name = escape(&profile.name),
        listeners = profile.monthly_listeners,
        tracks = tracks,
    );
    layout(&profile.name, user, flashes, &body)
}
