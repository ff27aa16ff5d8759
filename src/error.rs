//! API Errors
//!
//! Failures of a request before an application-level answer was obtained.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (network, CORS, bad URL).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The list endpoint answered with a non-success status.
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// A response arrived but its body was not the expected JSON shape.
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
