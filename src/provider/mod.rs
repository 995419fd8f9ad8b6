//! Web-search providers.
//!
//! The aggregator only needs "query in, organic results out"; this trait is
//! that seam. [`HttpSearchProvider`] talks to a SerpAPI/SearxNG style JSON
//! endpoint.

pub mod http;

use crate::error::SearchError;
use crate::models::SearchResult;
use async_trait::async_trait;

pub use http::HttpSearchProvider;

/// Something that can run a web search.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run `query` and return at most `limit` organic results, in rank order.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}
