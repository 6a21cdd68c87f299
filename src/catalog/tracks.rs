use serde_json::Value;

use crate::{
    types::{ImageMiss, SearchHit, SearchResults, TrackDetail},
    upstream::{Endpoint, Transport},
    warning,
};

use super::{
    Catalog, count_at,
    audio::{audio_query, resolve_audio},
    str_at,
};

pub(crate) const NO_ARTIST: &str = "No artist found";
pub(crate) const UNKNOWN_TRACK: &str = "Unknown track";

impl<T: Transport> Catalog<T> {
    /// Builds the track page record: metadata, cover art and audio preview.
    ///
    /// Returns `None` only when the metadata call itself fails. Image and
    /// audio lookups run concurrently and degrade independently.
    pub async fn track_detail(&self, track_id: &str) -> Option<TrackDetail> {
        let endpoint = Endpoint::TrackMetadata {
            track_id: track_id.to_string(),
        };
        let body = self.fetch(&endpoint).await?;

        let artist = str_at(&body, "/artists/0/name");
        let artist_name = artist.clone().unwrap_or_else(|| NO_ARTIST.to_string());

        let Some(track_name) = str_at(&body, "/name") else {
            warning!("{} {}: response has no 'name'", endpoint.label(), track_id);
            return Some(TrackDetail {
                track_id: track_id.to_string(),
                track_name: UNKNOWN_TRACK.to_string(),
                artist_name,
                track_image: self.missing_image(ImageMiss::NoImageTag),
                audio: None,
            });
        };

        let query = audio_query(&track_name, artist.as_deref().unwrap_or_default());
        let (track_image, audio) = tokio::join!(
            self.track_image(track_id, &track_name),
            resolve_audio(&self.transport, &query)
        );

        Some(TrackDetail {
            track_id: track_id.to_string(),
            track_name,
            artist_name,
            track_image,
            audio,
        })
    }

    /// Searches tracks by free text.
    ///
    /// A blank term returns empty results without calling upstream.
    pub async fn search(&self, term: &str) -> SearchResults {
        let mut results = SearchResults {
            query: term.to_string(),
            ..Default::default()
        };
        if term.trim().is_empty() {
            return results;
        }

        let endpoint = Endpoint::TrackSearch {
            term: term.to_string(),
        };
        let Some(body) = self.fetch(&endpoint).await else {
            return results;
        };
        let Some(items) = body.pointer("/tracks/items").and_then(Value::as_array) else {
            warning!("{}: response has no 'tracks.items'", endpoint.label());
            return results;
        };

        results.total_count = count_at(&body, "/tracks/totalCount").unwrap_or_default();

        let hits: Vec<SearchHit> = items.iter().filter_map(parse_search_item).collect();
        let keys: Vec<(String, String)> = hits
            .iter()
            .map(|hit| (hit.id.clone(), hit.track_name.clone()))
            .collect();
        let images = self.track_images(&keys).await;

        results.tracks = hits
            .into_iter()
            .zip(images)
            .map(|(hit, track_image)| SearchHit { track_image, ..hit })
            .collect();
        results
    }
}

/// Projects one search item; the image is filled in later.
fn parse_search_item(item: &Value) -> Option<SearchHit> {
    let Some(id) = str_at(item, "/id") else {
        warning!("track search: skipping item without id");
        return None;
    };

    Some(SearchHit {
        id,
        track_name: str_at(item, "/name").unwrap_or_else(|| UNKNOWN_TRACK.to_string()),
        artist_name: str_at(item, "/artists/0/name"),
        duration_text: str_at(item, "/durationText"),
        track_image: String::new(),
    })
}
