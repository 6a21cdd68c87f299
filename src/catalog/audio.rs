use serde_json::Value;

use crate::{
    types::AudioSource,
    upstream::{Endpoint, Transport},
    warning,
};

/// Looks up a playable audio stream for `query`.
///
/// `query` is the track name immediately followed by the primary artist
/// name, which is what the download endpoint matches against. Returns
/// `None` when the call fails or the response has no audio entry.
pub async fn resolve_audio<T: Transport>(transport: &T, query: &str) -> Option<AudioSource> {
    let endpoint = Endpoint::TrackDownload {
        query: query.to_string(),
    };

    let body = match transport.get_json(&endpoint).await {
        Ok(body) => body,
        Err(e) => {
            warning!("{} '{}': {}", endpoint.label(), query, e);
            return None;
        }
    };

    let audio = extract_audio(&body);
    if audio.is_none() {
        warning!("{} '{}': no audio data available", endpoint.label(), query);
    }
    audio
}

/// Reads the first entry of `youtubeVideo.audio`.
///
/// An entry without a `url` counts as no audio; a missing `durationText`
/// becomes an empty string.
pub fn extract_audio(body: &Value) -> Option<AudioSource> {
    let first = body.pointer("/youtubeVideo/audio/0")?;
    let url = first.get("url").and_then(Value::as_str)?;
    let duration_text = first
        .get("durationText")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(AudioSource {
        url: url.to_string(),
        duration_text: duration_text.to_string(),
    })
}

/// Query string for the download endpoint: name and artist, no separator.
pub fn audio_query(track_name: &str, artist_name: &str) -> String {
    format!("{}{}", track_name, artist_name)
}
