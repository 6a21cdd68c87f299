use serde_json::Value;

use crate::{
    config::ImageFallback,
    types::{ArtistSummary, HomeFeed, ImageMiss, TrackSummary},
    upstream::{Endpoint, Transport},
    warning,
};

use super::{Catalog, str_at};

/// Number of chart tracks shown on the home feed.
pub const FEED_LIMIT: usize = 25;
pub const WINDOW_SIZE: usize = 5;
pub const WINDOW_COUNT: usize = FEED_LIMIT / WINDOW_SIZE;

impl<T: Transport> Catalog<T> {
    /// Trending artists for the configured chart period.
    pub async fn top_artists(&self) -> Vec<ArtistSummary> {
        let endpoint = Endpoint::TopArtists {
            period: self.options.chart_period,
        };
        let Some(body) = self.fetch(&endpoint).await else {
            return Vec::new();
        };

        match parse_top_artists(&body, &self.options.image_fallback) {
            Some(artists) => artists,
            None => {
                warning!("{}: response has no 'artists' key", endpoint.label());
                Vec::new()
            }
        }
    }

    /// Trending tracks for the configured chart period, at most [`FEED_LIMIT`].
    pub async fn top_tracks(&self) -> Vec<TrackSummary> {
        let endpoint = Endpoint::TopTracks {
            period: self.options.chart_period,
        };
        let Some(body) = self.fetch(&endpoint).await else {
            return Vec::new();
        };

        match parse_top_tracks(&body) {
            Some(tracks) => tracks,
            None => {
                warning!("{}: response has no 'tracks' key", endpoint.label());
                Vec::new()
            }
        }
    }

    pub async fn home_feed(&self) -> HomeFeed {
        let (artists, tracks) = tokio::join!(self.top_artists(), self.top_tracks());
        HomeFeed {
            artists,
            track_windows: feed_windows(&tracks),
        }
    }
}

/// `None` when the body has no `artists` array.
pub(crate) fn parse_top_artists(
    body: &Value,
    fallback: &ImageFallback,
) -> Option<Vec<ArtistSummary>> {
    let artists = body.get("artists")?.as_array()?;

    Some(
        artists
            .iter()
            .map(|artist| ArtistSummary {
                name: str_at(artist, "/name").unwrap_or_else(|| "No Name".to_string()),
                avatar_url: str_at(artist, "/visuals/avatar/0/url")
                    .unwrap_or_else(|| fallback.text_for(ImageMiss::MissingField)),
                id: str_at(artist, "/id").unwrap_or_else(|| "No ID".to_string()),
            })
            .collect(),
    )
}

/// `None` when the body has no `tracks` array. Tracks without an id are dropped.
pub(crate) fn parse_top_tracks(body: &Value) -> Option<Vec<TrackSummary>> {
    let tracks = body.get("tracks")?.as_array()?;

    Some(
        tracks
            .iter()
            .take(FEED_LIMIT)
            .filter_map(|track| {
                let Some(id) = str_at(track, "/id") else {
                    warning!("top tracks: skipping entry without id");
                    return None;
                };
                Some(TrackSummary {
                    id,
                    track_name: str_at(track, "/name")
                        .unwrap_or_else(|| "Unknown track".to_string()),
                    artist_name: str_at(track, "/artists/0/name"),
                    cover_url: str_at(track, "/album/cover/0/url"),
                })
            })
            .collect(),
    )
}

/// Splits the feed into [`WINDOW_COUNT`] consecutive windows of [`WINDOW_SIZE`].
///
/// Input beyond [`FEED_LIMIT`] is ignored. Short input leaves the trailing
/// windows short or empty; nothing is padded.
pub fn feed_windows<I: Clone>(items: &[I]) -> Vec<Vec<I>> {
    let items = &items[..items.len().min(FEED_LIMIT)];
    (0..WINDOW_COUNT)
        .map(|i| {
            let start = (i * WINDOW_SIZE).min(items.len());
            let end = (start + WINDOW_SIZE).min(items.len());
            items[start..end].to_vec()
        })
        .collect()
}
