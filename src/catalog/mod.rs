//! # Catalog Module
//!
//! The aggregation pipeline: turns a page request (home feed, track detail,
//! search, artist profile) into a flat display record by chaining calls to
//! the metadata API, the catalog page scraper ([`image`]) and the audio
//! lookup ([`audio`]).
//!
//! Every flow follows the same shape:
//!
//! ```text
//! Start -> MetadataFetched -> Success -> per-item image/audio -> Assembled
//!                          -> Failure -> empty or partial record
//! ```
//!
//! No flow fails. An unreachable upstream, a non-200 status or a response
//! missing the expected keys is logged with `warning!` and yields an empty
//! collection, `None`, or a field filled by the configured
//! [`ImageFallback`].
//!
//! Per-item image resolution runs concurrently in chunks of
//! [`CatalogOptions::fan_out`], and results stay aligned with input order.

pub mod audio;
pub mod image;

mod artists;
mod charts;
mod tracks;

use futures::future::join_all;
use serde_json::Value;

use crate::{
    config::{Config, DEFAULT_FAN_OUT, ImageFallback},
    types::{ImageMiss, ResolvedImage},
    upstream::{ChartPeriod, Endpoint, Transport},
    warning,
};

pub use charts::{FEED_LIMIT, WINDOW_COUNT, WINDOW_SIZE, feed_windows};

#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub chart_period: ChartPeriod,
    pub fan_out: usize,
    pub image_fallback: ImageFallback,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            chart_period: ChartPeriod::default(),
            fan_out: DEFAULT_FAN_OUT,
            image_fallback: ImageFallback::default(),
        }
    }
}

impl From<&Config> for CatalogOptions {
    fn from(config: &Config) -> Self {
        Self {
            chart_period: config.chart_period,
            fan_out: config.fan_out,
            image_fallback: config.image_fallback.clone(),
        }
    }
}

/// Entry point of the aggregation pipeline.
pub struct Catalog<T> {
    transport: T,
    options: CatalogOptions,
}

impl<T: Transport> Catalog<T> {
    pub fn new(transport: T, options: CatalogOptions) -> Self {
        Self { transport, options }
    }

    /// Resolves the cover art of one track, applying the fallback policy.
    pub async fn track_image(&self, track_id: &str, display_name: &str) -> String {
        let resolved = image::resolve_image(&self.transport, track_id, display_name).await;
        self.image_or_fallback(resolved)
    }

    fn image_or_fallback(&self, resolved: Result<ResolvedImage, ImageMiss>) -> String {
        match resolved {
            Ok(image) => image.url,
            Err(miss) => self.options.image_fallback.text_for(miss),
        }
    }

    fn missing_image(&self, miss: ImageMiss) -> String {
        self.options.image_fallback.text_for(miss)
    }

    /// Resolves one image per `(track_id, display_name)` pair, in order.
    async fn track_images(&self, tracks: &[(String, String)]) -> Vec<String> {
        let mut images = Vec::with_capacity(tracks.len());
        for chunk in tracks.chunks(self.options.fan_out.max(1)) {
            let pending: Vec<_> = chunk
                .iter()
                .map(|(id, name)| self.track_image(id, name))
                .collect();
            images.extend(join_all(pending).await);
        }
        images
    }

    /// Calls `endpoint`, logging and swallowing any failure.
    async fn fetch(&self, endpoint: &Endpoint) -> Option<Value> {
        match self.transport.get_json(endpoint).await {
            Ok(body) => Some(body),
            Err(e) => {
                warning!("{}: {}", endpoint.label(), e);
                None
            }
        }
    }
}

fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Reads a count that upstream sends either as a number or a numeric string.
fn count_at(value: &Value, pointer: &str) -> Option<u64> {
    match value.pointer(pointer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().replace(',', "").parse::<u64>().ok(),
        _ => None,
    }
}
