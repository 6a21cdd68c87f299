//! # Upstream Module
//!
//! Client side of the two external sources the pages are built from:
//!
//! - the RapidAPI music metadata API (charts, track metadata, search, artist
//!   overview, audio download lookup), authenticated with a key and host
//!   header
//! - the public catalog page of a track, fetched anonymously and scraped for
//!   cover art
//!
//! The [`Transport`] trait is the seam between the aggregation pipeline and
//! the network. [`HttpTransport`] is the production implementation; tests
//! substitute canned responses.
//!
//! ## Failure model
//!
//! Each call is attempted once. Anything but `200 OK` is reported as
//! [`UpstreamError::Status`], network problems and timeouts as
//! [`UpstreamError::Transport`], unparsable bodies as
//! [`UpstreamError::Decode`]. Callers log and degrade; they never surface
//! these errors to the page.

mod client;
mod endpoint;
mod error;

use std::future::Future;

use serde_json::Value;

pub use client::HttpTransport;
pub use endpoint::{ChartPeriod, Endpoint};
pub use error::UpstreamError;

/// Outbound HTTP used by the aggregation pipeline.
pub trait Transport: Send + Sync {
    /// Calls `endpoint` and returns the decoded JSON body of a 200 response.
    fn get_json(
        &self,
        endpoint: &Endpoint,
    ) -> impl Future<Output = Result<Value, UpstreamError>> + Send;

    /// Fetches the public catalog page of `track_id` as HTML.
    fn get_catalog_page(
        &self,
        track_id: &str,
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}
