use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::{
    types::{ImageMiss, ResolvedImage},
    upstream::Transport,
    warning,
};

/// Width the cover art is displayed at.
pub const TARGET_WIDTH: u32 = 250;

static SRCSET_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(https://i\.scdn\.co/image/[a-zA-Z0-9]+) (\d+)w").expect("srcset pattern is valid")
});

static LABELLED_IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[alt]").expect("img selector is valid"));

/// Resolves the cover art of a track by scraping its catalog page.
///
/// The page is searched for an `img` whose `alt` equals `display_name`; its
/// `srcset` entry closest to [`TARGET_WIDTH`] wins. Every failure is
/// reported as an [`ImageMiss`] so the caller can apply its fallback policy.
pub async fn resolve_image<T: Transport>(
    transport: &T,
    track_id: &str,
    display_name: &str,
) -> Result<ResolvedImage, ImageMiss> {
    let html = match transport.get_catalog_page(track_id).await {
        Ok(html) => html,
        Err(e) => {
            warning!("catalog page for track {}: {}", track_id, e);
            return Err(ImageMiss::PageUnavailable);
        }
    };

    let candidates = find_image(&html, display_name)?;
    closest_to_width(&candidates, TARGET_WIDTH)
        .cloned()
        .ok_or(ImageMiss::NoImageUrl)
}

/// Finds the `img` labelled `display_name` and returns its `srcset` entries.
pub fn find_image(html: &str, display_name: &str) -> Result<Vec<ResolvedImage>, ImageMiss> {
    let document = Html::parse_document(html);
    let image = document
        .select(&LABELLED_IMG)
        .find(|el| el.value().attr("alt") == Some(display_name))
        .ok_or(ImageMiss::NoImageTag)?;

    let srcset = image.value().attr("srcset").unwrap_or_default();
    Ok(parse_srcset(srcset))
}

/// Extracts `(url, width)` pairs from a `srcset` attribute.
///
/// Only `https://i.scdn.co/image/<token> <width>w` entries are recognised;
/// anything else, including widths that overflow `u32`, is skipped.
pub fn parse_srcset(srcset: &str) -> Vec<ResolvedImage> {
    SRCSET_ENTRY
        .captures_iter(srcset)
        .filter_map(|caps| {
            let width = caps[2].parse::<u32>().ok()?;
            Some(ResolvedImage {
                url: caps[1].to_string(),
                width,
            })
        })
        .collect()
}

/// Picks the candidate whose width is nearest to `target`.
///
/// Ties go to the candidate listed first.
pub fn closest_to_width(candidates: &[ResolvedImage], target: u32) -> Option<&ResolvedImage> {
    candidates.iter().min_by_key(|c| c.width.abs_diff(target))
}
