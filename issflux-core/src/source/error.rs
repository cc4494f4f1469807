use thiserror::Error;

/// Errors from [`crate::source::ReadingSource::fetch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be sent or the response could not be read.
    #[error("network error fetching {url}: {message}")]
    Network {
        /// Upstream URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Upstream URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The upstream answered with a non-success status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Upstream URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The payload did not decode into the expected shape.
    #[error("failed to decode reading: {message}")]
    Decode {
        /// Decoder error description.
        message: String,
    },
}
