use thiserror::Error;

/// Errors from [`crate::sink::LineSink::write`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The request could not be sent.
    #[error("network error writing to {url}: {message}")]
    Network {
        /// Write endpoint.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The write did not complete within the configured timeout.
    #[error("write to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Write endpoint.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The store answered with a non-success status.
    #[error("write to {url} rejected with status {status}: {message}")]
    Http {
        /// Write endpoint.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
}
