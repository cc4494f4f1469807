/// Error type for HTTP adapter construction failures.
#[derive(Debug)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
    /// The configured endpoint is not a valid URL.
    InvalidUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },
}

impl std::fmt::Display for ClientBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
            Self::InvalidUrl { url, source } => write!(f, "invalid URL {url:?}: {source}"),
        }
    }
}

impl std::error::Error for ClientBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
            Self::InvalidUrl { source, .. } => Some(source),
        }
    }
}
