/// Failure of a single search attempt
///
/// Every variant is retryable; none of them leaves the fetcher.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or protocol failure from the HTTP client
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("service returned HTTP {status}")]
    Status { status: u16 },

    /// The body is not the expected JSON document
    #[error("malformed search response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failure reported by a non-HTTP transport
    #[error("{0}")]
    Other(String),
}
