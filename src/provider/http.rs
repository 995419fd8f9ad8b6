//! HTTP search provider backed by reqwest.

use super::SearchProvider;
use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::models::SearchResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Search response body.
///
/// SerpAPI returns `organic_results`; SearxNG returns `results`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default, alias = "results")]
    organic_results: Vec<SearchResult>,
}

/// Provider issuing `GET <endpoint>?q=..&num=..` requests.
pub struct HttpSearchProvider {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    extra_params: BTreeMap<String, String>,
    timeout_seconds: u64,
}

impl HttpSearchProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("jobscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            extra_params: config.extra_params.clone(),
            timeout_seconds: config.timeout_seconds,
        })
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        debug!("GET {} q={:?} num={}", self.endpoint, query, limit);

        let num = limit.to_string();
        let mut request = self
            .http_client
            .get(&self.endpoint)
            .query(&[("q", query), ("num", num.as_str())])
            .query(&self.extra_params);

        if let Some(ref key) = self.api_key {
            request = request.query(&[("api_key", key)]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout(self.timeout_seconds)
            } else if e.is_connect() {
                SearchError::Connect(self.endpoint.clone())
            } else {
                SearchError::Request(e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let body = response.text().await?;
        let mut results = parse_response(&body)?;
        results.truncate(limit);
        Ok(results)
    }

    fn name(&self) -> &str {
        &self.endpoint
    }
}

/// Decode a provider response body into organic results.
pub fn parse_response(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.organic_results)
}
