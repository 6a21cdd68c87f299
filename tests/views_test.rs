use tunefeed::{
    config::AudioFallback,
    types::{AudioSource, TrackDetail},
    views,
};

fn detail(audio: Option<AudioSource>) -> TrackDetail {
    TrackDetail {
        track_id: "T1".to_string(),
        track_name: "Song <live>".to_string(),
        artist_name: "Artist".to_string(),
        track_image: "No Image Tag Found".to_string(),
        audio,
    }
}

#[test]
fn test_music_page_with_audio() {
    let audio = AudioSource {
        url: "http://a/u.mp3".to_string(),
        duration_text: "3:12".to_string(),
    };
    let html = views::music_page(None, &[], Some(&detail(Some(audio))), &AudioFallback::Notice).0;

    assert!(html.contains(r#"<audio controls src="http://a/u.mp3">"#));
    assert!(html.contains("3:12"));
    assert!(!html.contains("Preview unavailable"));
}

#[test]
fn test_music_page_without_audio() {
    let html = views::music_page(Some("ada"), &[], Some(&detail(None)), &AudioFallback::Notice).0;

    assert!(html.contains("Preview unavailable"));
    assert!(!html.contains("<audio"));

    // Sentinel image text is shown as text, never as an <img> source
    assert!(html.contains(r#"<span class="no-image">No Image Tag Found</span>"#));

    // Upstream text is escaped
    assert!(html.contains("Song &lt;live&gt;"));
    assert!(html.contains(r#"<a href="/logout">"#));
}

#[test]
fn test_music_page_audio_fallback_policies() {
    let custom = AudioFallback::Text("<b>Soon</b>".to_string());
    let html = views::music_page(None, &[], Some(&detail(None)), &custom).0;
    assert!(html.contains(r#"<p class="no-audio">&lt;b&gt;Soon&lt;/b&gt;</p>"#));

    let html = views::music_page(None, &[], Some(&detail(None)), &AudioFallback::Hidden).0;
    assert!(!html.contains("no-audio"));
    assert!(!html.contains("Preview unavailable"));
}

#[test]
fn test_music_page_for_unavailable_track() {
    let html = views::music_page(None, &[], None, &AudioFallback::Notice).0;
    assert!(html.contains("This track is unavailable right now."));
}

#[test]
fn test_flash_messages_are_rendered() {
    let flashes = vec!["Credentials Invalid".to_string()];
    let html = views::login_page(&flashes).0;

    assert!(html.contains(r#"<li class="message">Credentials Invalid</li>"#));
    assert!(html.contains(r#"action="/login""#));
}

#[test]
fn test_search_page_without_results_shows_form_only() {
    let html = views::search_page(None, &[], None).0;

    assert!(html.contains(r#"name="search_query""#));
    assert!(!html.contains("results for"));
}
