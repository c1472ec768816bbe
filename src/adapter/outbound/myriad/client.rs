//! Myriad REST API client.
//!
//! Two endpoints are used:
//! - `GET /markets/{slug}` for a single market document
//! - `GET /markets?network_id=..&token=..[&state=..]` for the listing
//!
//! Documents are returned as raw JSON so routes can pass them through
//! unchanged. Requests are not retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::settings::MetadataConfig;
use crate::error::{ConfigError, Error, Result};
use crate::port::{MarketDirectory, MarketQuery};

/// HTTP client for the market metadata API.
pub struct MyriadClient {
    http: HttpClient,
    base_url: Url,
}

impl MyriadClient {
    /// Create a client with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns a config error if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&MetadataConfig {
            api_url: base_url.to_string(),
            ..MetadataConfig::default()
        })
    }

    /// # Errors
    ///
    /// Returns a config error if `config.api_url` is not an absolute URL.
    pub fn from_config(config: &MetadataConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.api_url)?;
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self { http, base_url })
    }

    fn market_url(&self, slug: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("markets").push(slug);
        }
        url
    }

    fn markets_url(&self, query: &MarketQuery) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("markets");
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("network_id", &query.network_id)
                .append_pair("token", &query.token);
            if let Some(state) = &query.state {
                pairs.append_pair("state", state);
            }
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field: "metadata.api_url",
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            field: "metadata.api_url",
            reason: format!("{raw} cannot be a base URL"),
        }
        .into());
    }
    Ok(url)
}

#[async_trait]
impl MarketDirectory for MyriadClient {
    async fn market(&self, slug: &str) -> Result<Value> {
        let url = self.market_url(slug);
        debug!(url = %url, "Fetching market");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(slug, status = status.as_u16(), "Market lookup failed");
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("error").to_string(),
            });
        }
        Ok(response.json().await?)
    }

    async fn markets(&self, query: &MarketQuery) -> Result<Value> {
        let url = self.markets_url(query);
        info!(url = %url, "Fetching markets");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Metadata API rejected market listing");
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("error").to_string(),
            });
        }

        let markets: Value = response.json().await?;
        debug!(count = markets.as_array().map_or(0, Vec::len), "Fetched markets");
        Ok(markets)
    }
}
