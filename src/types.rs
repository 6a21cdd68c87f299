use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub name: String,
    pub avatar_url: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackSummary {
    pub id: String,
    pub track_name: String,
    pub artist_name: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeFeed {
    pub artists: Vec<ArtistSummary>,
    /// Always five windows of at most five tracks each.
    pub track_windows: Vec<Vec<TrackSummary>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioSource {
    pub url: String,
    pub duration_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackDetail {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub track_image: String,
    pub audio: Option<AudioSource>,
}

impl TrackDetail {
    pub fn audio_url(&self) -> Option<&str> {
        self.audio.as_ref().map(|a| a.url.as_str())
    }

    pub fn duration_text(&self) -> Option<&str> {
        self.audio.as_ref().map(|a| a.duration_text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub track_name: String,
    pub artist_name: Option<String>,
    pub duration_text: Option<String>,
    pub track_image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub total_count: u64,
    pub tracks: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileTrack {
    pub id: String,
    pub name: String,
    pub duration_text: Option<String>,
    pub play_count: u64,
    pub track_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistProfile {
    pub id: String,
    pub name: String,
    pub monthly_listeners: u64,
    pub header_url: String,
    pub top_tracks: Vec<ProfileTrack>,
}

/// One entry of a responsive `srcset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    pub url: String,
    pub width: u32,
}

/// Why no image URL could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMiss {
    /// The catalog page has no `img` labelled with the display name.
    NoImageTag,
    /// The labelled `img` has no parseable `srcset` entry.
    NoImageUrl,
    /// The metadata response carried no image field.
    MissingField,
    /// The catalog page could not be fetched.
    PageUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub date_joined: String,
}

#[derive(Tabled)]
pub struct UserTableRow {
    pub username: String,
    pub email: String,
    pub joined: String,
}
