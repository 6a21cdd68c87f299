use serde_json::Value;

use crate::{
    types::{ArtistProfile, ImageMiss, ProfileTrack},
    upstream::{Endpoint, Transport},
    warning,
};

use super::{Catalog, count_at, str_at, tracks::UNKNOWN_TRACK};

impl<T: Transport> Catalog<T> {
    /// Builds the artist page record with cover art for each top track.
    ///
    /// Returns `None` when the overview call fails.
    pub async fn artist_profile(&self, artist_id: &str) -> Option<ArtistProfile> {
        let endpoint = Endpoint::ArtistOverview {
            artist_id: artist_id.to_string(),
        };
        let body = self.fetch(&endpoint).await?;

        let name = str_at(&body, "/name").unwrap_or_else(|| {
            warning!("{} {}: response has no 'name'", endpoint.label(), artist_id);
            "No Name".to_string()
        });
        let header_url = str_at(&body, "/visuals/header/0/url")
            .unwrap_or_else(|| self.missing_image(ImageMiss::MissingField));

        let tracks: Vec<ProfileTrack> = match body
            .pointer("/discography/topTracks")
            .and_then(Value::as_array)
        {
            Some(items) => items.iter().filter_map(parse_top_track).collect(),
            None => {
                warning!(
                    "{} {}: response has no 'discography.topTracks'",
                    endpoint.label(),
                    artist_id
                );
                Vec::new()
            }
        };

        let keys: Vec<(String, String)> = tracks
            .iter()
            .map(|t| (t.id.clone(), t.name.clone()))
            .collect();
        let images = self.track_images(&keys).await;

        Some(ArtistProfile {
            id: artist_id.to_string(),
            name,
            monthly_listeners: count_at(&body, "/stats/monthlyListeners").unwrap_or_default(),
            header_url,
            top_tracks: tracks
                .into_iter()
                .zip(images)
                .map(|(track, track_image)| ProfileTrack {
                    track_image,
                    ..track
                })
                .collect(),
        })
    }
}

fn parse_top_track(track: &Value) -> Option<ProfileTrack> {
    // ids occasionally arrive as numbers
    let id = match track.get("id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    Some(ProfileTrack {
        id,
        name: str_at(track, "/name").unwrap_or_else(|| UNKNOWN_TRACK.to_string()),
        duration_text: str_at(track, "/durationText"),
        play_count: count_at(track, "/playCount").unwrap_or_default(),
        track_image: String::new(),
    })
}
