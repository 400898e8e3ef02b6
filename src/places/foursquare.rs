use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::consts::PLACES_SEARCH_URL;

use super::{PlacesSearch, SearchQuery};

/// Places search over the Foursquare HTTP API.
#[derive(Debug, Clone)]
pub struct FoursquareClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FoursquareClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, PLACES_SEARCH_URL)
    }

    /// Point the client at another search endpoint (a local fake, a proxy).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, query: &SearchQuery) -> Result<Url> {
        Url::parse_with_params(&self.base_url, query.params())
            .with_context(|| format!("invalid places search url: {}", self.base_url))
    }
}

#[async_trait]
impl PlacesSearch for FoursquareClient {
    async fn search(&self, query: &SearchQuery) -> Result<Value> {
        let url = self.url(query)?;
        debug!("places search: {url}");

        let resp = self
            .http
            .get(url)
            // The provider takes the bare key, no scheme prefix.
            .header("authorization", &self.api_key)
            .header("accept", "application/json")
            .send()
            .await
            .context("places provider request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("places provider error ({}): {}", status, text);
        }

        resp.json::<Value>()
            .await
            .context("places provider returned invalid JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_all_params() {
        let client = FoursquareClient::with_base_url("key", "http://localhost:1/search");
        let url = client.url(&SearchQuery::nearby(40.5, -74.25)).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(url.path(), "/search");
        assert!(pairs.contains(&("ll".to_string(), "40.5,-74.25".to_string())));
        assert!(pairs.contains(&("radius".to_string(), "10000".to_string())));
        assert!(pairs.contains(&("categories".to_string(), "13065".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "20".to_string())));
        assert!(pairs.contains(&("sort".to_string(), "DISTANCE".to_string())));
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        let client = FoursquareClient::with_base_url("key", "not a url");
        let err = client.url(&SearchQuery::closest(0.0, 0.0)).unwrap_err();
        assert!(err.to_string().contains("invalid places search url"));
    }

    #[test]
    fn default_client_targets_provider() {
        let client = FoursquareClient::new("key");
        assert_eq!(client.base_url, PLACES_SEARCH_URL);
    }
}
