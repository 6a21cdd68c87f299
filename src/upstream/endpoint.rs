use std::{fmt, str::FromStr};

/// Chart window requested from the chart endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChartPeriod {
    Daily,
    #[default]
    Weekly,
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartPeriod::Daily => "daily",
            ChartPeriod::Weekly => "weekly",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(ChartPeriod::Daily),
            "weekly" => Ok(ChartPeriod::Weekly),
            other => Err(format!("unknown chart period '{}'", other)),
        }
    }
}

/// One call against the metadata API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    TopArtists { period: ChartPeriod },
    TopTracks { period: ChartPeriod },
    TrackMetadata { track_id: String },
    TrackSearch { term: String },
    ArtistOverview { artist_id: String },
    /// Secondary endpoint resolving a playable audio stream for a free-text query.
    TrackDownload { query: String },
}

impl Endpoint {
    /// Path relative to the API base url.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::TopArtists { .. } => "/chart/artists/top",
            Endpoint::TopTracks { .. } => "/chart/tracks/top",
            Endpoint::TrackMetadata { .. } => "/track/metadata",
            Endpoint::TrackSearch { .. } => "/search",
            Endpoint::ArtistOverview { .. } => "/artist/overview",
            Endpoint::TrackDownload { .. } => "/track/download",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::TopArtists { period } | Endpoint::TopTracks { period } => {
                vec![("type", period.to_string())]
            }
            Endpoint::TrackMetadata { track_id } => vec![("trackId", track_id.clone())],
            Endpoint::TrackSearch { term } => {
                vec![("term", term.clone()), ("type", "track".to_string())]
            }
            Endpoint::ArtistOverview { artist_id } => vec![("artistId", artist_id.clone())],
            Endpoint::TrackDownload { query } => vec![("track", query.clone())],
        }
    }

    /// Short name used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::TopArtists { .. } => "top artists",
            Endpoint::TopTracks { .. } => "top tracks",
            Endpoint::TrackMetadata { .. } => "track metadata",
            Endpoint::TrackSearch { .. } => "track search",
            Endpoint::ArtistOverview { .. } => "artist overview",
            Endpoint::TrackDownload { .. } => "track download",
        }
    }
}
