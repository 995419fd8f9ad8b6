//! Errors raised by the search provider.
//!
//! The aggregator never lets these escape: a failing source contributes an
//! empty result and the error is only logged.

use thiserror::Error;

/// Failure of one provider query.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request timed out after {0}s")]
    Timeout(u64),

    #[error("cannot connect to search provider at {0}")]
    Connect(String),

    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode search response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Decode(err.to_string())
    }
}
