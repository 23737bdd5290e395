//! Error types for catalog retrieval.

use thiserror::Error;

/// Errors that can occur while listing a channel's catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A call argument was rejected before any request was made
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Upstream returned a non-success status
    #[error("Page request failed ({status}): {}", upstream_message(.body))]
    FetchFailure { status: u16, body: String },

    /// Upstream returned a success status with a body we could not parse
    #[error("Malformed {resource} response: {source}")]
    MalformedResponse {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Request never produced a status (connect, timeout, body read)
    #[error("HTTP transport error")]
    Transport(#[from] reqwest::Error),

    /// Retrieval was cancelled by the caller
    #[error("Retrieval cancelled")]
    Cancelled,

    /// Upstream kept returning cursors past the configured page bound
    #[error("Page limit exceeded: upstream still had more pages after {limit}")]
    PageLimitExceeded { limit: u32 },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Pull `error.message` out of a Google API error body, falling back to the raw text.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
