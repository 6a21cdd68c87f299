use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::Config;

use super::{Endpoint, Transport, UpstreamError};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// [`Transport`] backed by a shared `reqwest` client.
///
/// Every request is bounded by the configured timeout and attempted once.
pub struct HttpTransport {
    client: Client,
    api_url: String,
    api_key: String,
    api_host: String,
    catalog_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
            catalog_url: config.catalog_url.clone(),
        })
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, endpoint: &Endpoint) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.api_url, endpoint.path());
        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .query(&endpoint.query())
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamError::Status(response.status()));
        }

        let json = response.json::<Value>().await?;
        Ok(json)
    }

    async fn get_catalog_page(&self, track_id: &str) -> Result<String, UpstreamError> {
        let url = format!("{}/track/{}", self.catalog_url, track_id);
        let response = self.client.get(&url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}
