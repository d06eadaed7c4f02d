//! Fetch error types.

/// Errors from probing or downloading the schedule feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The origin answered with a non-success status
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// Persisting the downloaded body failed
    #[error("failed to store archive: {0}")]
    Io(#[from] std::io::Error),

    /// The configured API key cannot be sent as a header
    #[error("invalid API key format")]
    InvalidApiKey,
}
