#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use reqwest::StatusCode;
use serde_json::Value;
use tunefeed::{
    catalog::{Catalog, CatalogOptions},
    upstream::{Endpoint, Transport, UpstreamError},
};

/// Upstream double serving canned bodies and recording what was asked.
#[derive(Default, Clone)]
pub struct FakeTransport {
    json: HashMap<Endpoint, Value>,
    pages: HashMap<String, String>,
    pub calls: Arc<Mutex<Vec<Endpoint>>>,
    pub page_hits: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, endpoint: Endpoint, body: Value) -> Self {
        self.json.insert(endpoint, body);
        self
    }

    pub fn with_page(mut self, track_id: &str, html: &str) -> Self {
        self.pages.insert(track_id.to_string(), html.to_string());
        self
    }

    pub fn page_hits_for(&self, track_id: &str) -> usize {
        self.page_hits
            .lock()
            .unwrap()
            .iter()
            .filter(|id| id.as_str() == track_id)
            .count()
    }

    pub fn calls(&self) -> Vec<Endpoint> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get_json(&self, endpoint: &Endpoint) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push(endpoint.clone());
        self.json
            .get(endpoint)
            .cloned()
            .ok_or(UpstreamError::Status(StatusCode::SERVICE_UNAVAILABLE))
    }

    async fn get_catalog_page(&self, track_id: &str) -> Result<String, UpstreamError> {
        self.page_hits.lock().unwrap().push(track_id.to_string());
        self.pages
            .get(track_id)
            .cloned()
            .ok_or(UpstreamError::Status(StatusCode::NOT_FOUND))
    }
}

pub fn catalog(transport: FakeTransport) -> Catalog<FakeTransport> {
    Catalog::new(transport, CatalogOptions::default())
}

/// Catalog page with one labelled cover image.
pub fn cover_page(display_name: &str, srcset: &str) -> String {
    format!(
        r#"<html><body>
<img alt="Spotify logo" src="/logo.svg">
<img alt="{}" srcset="{}" src="https://i.scdn.co/image/fallback">
</body></html>"#,
        display_name, srcset
    )
}

pub fn srcset(entries: &[(&str, u32)]) -> String {
    entries
        .iter()
        .map(|(token, width)| format!("https://i.scdn.co/image/{} {}w", token, width))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn scdn(token: &str) -> String {
    format!("https://i.scdn.co/image/{}", token)
}
