mod common;

use common::{FakeTransport, catalog, cover_page, scdn, srcset};
use serde_json::{Value, json};
use tunefeed::{
    catalog::{Catalog, CatalogOptions, feed_windows},
    config::ImageFallback,
    types::AudioSource,
    upstream::{ChartPeriod, Endpoint},
};

fn top_tracks_endpoint() -> Endpoint {
    Endpoint::TopTracks {
        period: ChartPeriod::Weekly,
    }
}

fn top_artists_endpoint() -> Endpoint {
    Endpoint::TopArtists {
        period: ChartPeriod::Weekly,
    }
}

fn chart_track(n: usize) -> Value {
    json!({
        "id": format!("t{}", n),
        "name": format!("Track {}", n),
        "artists": [{ "name": format!("Artist {}", n) }],
        "album": { "cover": [{ "url": format!("https://i.scdn.co/image/c{}", n) }] }
    })
}

fn chart(count: usize) -> Value {
    json!({ "tracks": (0..count).map(chart_track).collect::<Vec<_>>() })
}

fn download(url: &str, duration: &str) -> Value {
    json!({ "youtubeVideo": { "audio": [{ "url": url, "durationText": duration }] } })
}

#[test]
fn test_feed_windows_full() {
    let items: Vec<usize> = (0..40).collect();
    let windows = feed_windows(&items);

    let sizes: Vec<usize> = windows.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![5, 5, 5, 5, 5]);
    assert_eq!(windows[0], vec![0, 1, 2, 3, 4]);
    assert_eq!(windows[4], vec![20, 21, 22, 23, 24]);
}

#[test]
fn test_feed_windows_short_input_is_not_padded() {
    let items: Vec<usize> = (0..12).collect();
    let windows = feed_windows(&items);

    let sizes: Vec<usize> = windows.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![5, 5, 2, 0, 0]);
    assert_eq!(windows[2], vec![10, 11]);
}

#[test]
fn test_feed_windows_empty() {
    let windows = feed_windows::<usize>(&[]);
    assert_eq!(windows.len(), 5);
    assert!(windows.iter().all(Vec::is_empty));
}

#[tokio::test]
async fn test_top_tracks_truncates_to_25() {
    let transport = FakeTransport::new().with_json(top_tracks_endpoint(), chart(40));
    let tracks = catalog(transport).top_tracks().await;

    assert_eq!(tracks.len(), 25);
    assert_eq!(tracks[0].id, "t0");
    assert_eq!(tracks[24].id, "t24");
    assert_eq!(tracks[3].artist_name.as_deref(), Some("Artist 3"));
    assert_eq!(tracks[3].cover_url.as_deref(), Some("https://i.scdn.co/image/c3"));
}

#[tokio::test]
async fn test_top_tracks_tolerates_missing_fields() {
    let body = json!({ "tracks": [
        { "id": "a", "name": "No Artists", "artists": [], "album": { "cover": [] } },
        { "id": "b", "name": "No Album" },
        { "name": "No Id" }
    ]});
    let transport = FakeTransport::new().with_json(top_tracks_endpoint(), body);
    let tracks = catalog(transport).top_tracks().await;

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].artist_name, None);
    assert_eq!(tracks[0].cover_url, None);
    assert_eq!(tracks[1].track_name, "No Album");
}

#[tokio::test]
async fn test_listings_are_empty_on_schema_drift() {
    let transport = FakeTransport::new()
        .with_json(top_tracks_endpoint(), json!({ "items": [] }))
        .with_json(top_artists_endpoint(), json!({ "charts": [] }))
        .with_json(
            Endpoint::TrackSearch {
                term: "song".to_string(),
            },
            json!({ "albums": {} }),
        );
    let catalog = catalog(transport);

    assert!(catalog.top_tracks().await.is_empty());
    assert!(catalog.top_artists().await.is_empty());

    let results = catalog.search("song").await;
    assert!(results.tracks.is_empty());
    assert_eq!(results.total_count, 0);
}

#[tokio::test]
async fn test_listings_are_empty_when_upstream_fails() {
    // no canned responses: every call fails with 503
    let catalog = catalog(FakeTransport::new());

    let feed = catalog.home_feed().await;
    assert!(feed.artists.is_empty());
    assert_eq!(feed.track_windows.len(), 5);
    assert!(feed.track_windows.iter().all(Vec::is_empty));

    assert!(catalog.search("anything").await.tracks.is_empty());
    assert!(catalog.track_detail("T1").await.is_none());
    assert!(catalog.artist_profile("A1").await.is_none());
}

#[tokio::test]
async fn test_top_artists_projection() {
    let body = json!({ "artists": [
        { "name": "Band", "id": "a1", "visuals": { "avatar": [{ "url": "https://i.scdn.co/image/av" }] } },
        { "name": "Solo", "id": "a2", "visuals": { "avatar": [] } }
    ]});
    let transport = FakeTransport::new().with_json(top_artists_endpoint(), body);
    let artists = catalog(transport).top_artists().await;

    assert_eq!(artists.len(), 2);
    assert_eq!(artists[0].avatar_url, "https://i.scdn.co/image/av");
    assert_eq!(artists[0].id, "a1");
    assert_eq!(artists[1].avatar_url, "No URL");
}

#[tokio::test]
async fn test_home_feed_windows_of_chart() {
    let transport = FakeTransport::new()
        .with_json(top_tracks_endpoint(), chart(13))
        .with_json(top_artists_endpoint(), json!({ "artists": [] }));
    let feed = catalog(transport).home_feed().await;

    let sizes: Vec<usize> = feed.track_windows.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![5, 5, 3, 0, 0]);
    assert_eq!(feed.track_windows[1][0].id, "t5");
}

#[tokio::test]
async fn test_track_detail_end_to_end() {
    let transport = FakeTransport::new()
        .with_json(
            Endpoint::TrackMetadata {
                track_id: "T1".to_string(),
            },
            json!({ "name": "Song", "artists": [{ "name": "Artist" }] }),
        )
        .with_json(
            Endpoint::TrackDownload {
                query: "SongArtist".to_string(),
            },
            download("http://a/u.mp3", "3:12"),
        )
        .with_page("T1", "<html><body><p>nothing here</p></body></html>");

    let detail = catalog(transport).track_detail("T1").await.unwrap();

    assert_eq!(detail.track_name, "Song");
    assert_eq!(detail.artist_name, "Artist");
    assert_eq!(detail.track_image, "No Image Tag Found");
    assert_eq!(detail.audio_url(), Some("http://a/u.mp3"));
    assert_eq!(detail.duration_text(), Some("3:12"));
}

#[tokio::test]
async fn test_track_detail_without_audio_still_renders() {
    let transport = FakeTransport::new()
        .with_json(
            Endpoint::TrackMetadata {
                track_id: "T1".to_string(),
            },
            json!({ "name": "Song", "artists": [{ "name": "Artist" }] }),
        )
        .with_json(
            Endpoint::TrackDownload {
                query: "SongArtist".to_string(),
            },
            json!({ "youtubeVideo": { "audio": [] } }),
        )
        .with_page("T1", &cover_page("Song", &srcset(&[("big", 640), ("mid", 300)])));

    let detail = catalog(transport).track_detail("T1").await.unwrap();

    assert_eq!(detail.audio, None);
    assert_eq!(detail.duration_text(), None);
    assert_eq!(detail.track_image, scdn("mid"));
}

#[tokio::test]
async fn test_track_detail_without_artist() {
    let transport = FakeTransport::new()
        .with_json(
            Endpoint::TrackMetadata {
                track_id: "T1".to_string(),
            },
            json!({ "name": "Song", "artists": [] }),
        )
        .with_json(
            Endpoint::TrackDownload {
                query: "Song".to_string(),
            },
            download("http://a/solo.mp3", "2:00"),
        );

    let detail = catalog(transport).track_detail("T1").await.unwrap();

    assert_eq!(detail.artist_name, "No artist found");
    assert_eq!(
        detail.audio,
        Some(AudioSource {
            url: "http://a/solo.mp3".to_string(),
            duration_text: "2:00".to_string()
        })
    );
}

#[tokio::test]
async fn test_track_detail_without_name_skips_lookups() {
    let transport = FakeTransport::new().with_json(
        Endpoint::TrackMetadata {
            track_id: "T1".to_string(),
        },
        json!({ "artists": [{ "name": "Artist" }] }),
    );
    let catalog = catalog(transport.clone());

    let detail = catalog.track_detail("T1").await.unwrap();

    assert_eq!(detail.track_name, "Unknown track");
    assert_eq!(detail.audio, None);
    assert_eq!(transport.page_hits_for("T1"), 0);
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_search_resolves_each_image_once_in_order() {
    let items: Vec<Value> = (0..12)
        .map(|n| {
            json!({
                "id": format!("s{}", n),
                "name": format!("Hit {}", n),
                "artists": [{ "name": "Band" }],
                "durationText": "3:00"
            })
        })
        .collect();
    let mut transport = FakeTransport::new().with_json(
        Endpoint::TrackSearch {
            term: "hit".to_string(),
        },
        json!({ "tracks": { "totalCount": 120, "items": items } }),
    );
    for n in 0..12 {
        let token = format!("img{}", n);
        transport = transport.with_page(
            &format!("s{}", n),
            &cover_page(&format!("Hit {}", n), &srcset(&[(token.as_str(), 300)])),
        );
    }

    let options = CatalogOptions {
        fan_out: 5,
        ..CatalogOptions::default()
    };
    let results = Catalog::new(transport.clone(), options).search("hit").await;

    assert_eq!(results.total_count, 120);
    assert_eq!(results.tracks.len(), 12);
    for (n, hit) in results.tracks.iter().enumerate() {
        assert_eq!(hit.id, format!("s{}", n));
        assert_eq!(hit.track_image, scdn(&format!("img{}", n)));
        assert_eq!(transport.page_hits_for(&hit.id), 1);
    }
    assert_eq!(results.tracks[0].duration_text.as_deref(), Some("3:00"));
}

#[tokio::test]
async fn test_blank_search_does_not_call_upstream() {
    let transport = FakeTransport::new();
    let results = catalog(transport.clone()).search("   ").await;

    assert!(results.tracks.is_empty());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_artist_profile() {
    let transport = FakeTransport::new()
        .with_json(
            Endpoint::ArtistOverview {
                artist_id: "A1".to_string(),
            },
            json!({
                "name": "Band",
                "stats": { "monthlyListeners": 1234567 },
                "visuals": { "header": [{ "url": "https://i.scdn.co/image/header" }] },
                "discography": { "topTracks": [
                    { "id": "p1", "name": "First", "durationText": "3:30", "playCount": 900 },
                    { "id": "p2", "name": "Second", "durationText": "4:01", "playCount": "12" }
                ]}
            }),
        )
        .with_page("p1", &cover_page("First", &srcset(&[("first", 250)])));

    let options = CatalogOptions {
        image_fallback: ImageFallback::Empty,
        ..CatalogOptions::default()
    };
    let profile = Catalog::new(transport.clone(), options)
        .artist_profile("A1")
        .await
        .unwrap();

    assert_eq!(profile.name, "Band");
    assert_eq!(profile.monthly_listeners, 1_234_567);
    assert_eq!(profile.header_url, "https://i.scdn.co/image/header");
    assert_eq!(profile.top_tracks.len(), 2);
    assert_eq!(profile.top_tracks[0].track_image, scdn("first"));
    assert_eq!(profile.top_tracks[0].play_count, 900);
    assert_eq!(profile.top_tracks[1].track_image, "");
    assert_eq!(profile.top_tracks[1].play_count, 12);
    assert_eq!(transport.page_hits_for("p1"), 1);
    assert_eq!(transport.page_hits_for("p2"), 1);
}

#[tokio::test]
async fn test_artist_profile_with_sparse_overview() {
    let transport = FakeTransport::new().with_json(
        Endpoint::ArtistOverview {
            artist_id: "A1".to_string(),
        },
        json!({ "name": "Band" }),
    );
    let options = CatalogOptions {
        image_fallback: ImageFallback::Placeholder("https://example.com/blank.png".to_string()),
        ..CatalogOptions::default()
    };

    let profile = Catalog::new(transport, options)
        .artist_profile("A1")
        .await
        .unwrap();

    assert_eq!(profile.monthly_listeners, 0);
    assert_eq!(profile.header_url, "https://example.com/blank.png");
    assert!(profile.top_tracks.is_empty());
}
