//! HTTP-based `ReadingSource` polling the open-notify `iss-now` endpoint.

use std::time::Duration;

use issflux_core::{FetchError, Reading, ReadingSource};
use log::debug;
use reqwest::Client;

use super::open_notify::IssNowResponse;
use super::runtime::BlockingRuntime;
use super::{ClientBuildError, DEFAULT_USER_AGENT};

/// Public endpoint reporting the station's current position.
pub const DEFAULT_SOURCE_URL: &str = "http://api.open-notify.org/iss-now.json";

/// Configuration for [`HttpReadingSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReadingSourceConfig {
    /// Endpoint returning the current position as JSON.
    pub url: String,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpReadingSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_owned(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpReadingSourceConfig {
    /// Create a configuration polling `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Polls the position endpoint with one GET per [`ReadingSource::fetch`].
#[derive(Debug)]
pub struct HttpReadingSource {
    client: Client,
    config: HttpReadingSourceConfig,
    runtime: BlockingRuntime,
}

impl HttpReadingSource {
    /// Create a source with default configuration polling `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpReadingSourceConfig::new(url))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpReadingSourceConfig) -> Result<Self, ClientBuildError> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        let client = builder.build().map_err(ClientBuildError::HttpClient)?;
        let runtime = BlockingRuntime::new()?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &HttpReadingSourceConfig {
        &self.config
    }

    async fn fetch_async(&self) -> Result<Reading, FetchError> {
        let url = self.config.url.as_str();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        decode_reading(&body)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> FetchError {
        let url = self.config.url.clone();
        if error.is_timeout() {
            return FetchError::Timeout {
                url,
                timeout_secs: self.config.timeout.map_or(0, |timeout| timeout.as_secs()),
            };
        }

        if let Some(status) = error.status() {
            return FetchError::Http {
                url,
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        FetchError::Network {
            url,
            message: error.to_string(),
        }
    }
}

/// Decode an `iss-now` body into a [`Reading`].
fn decode_reading(body: &[u8]) -> Result<Reading, FetchError> {
    let response: IssNowResponse =
        serde_json::from_slice(body).map_err(|err| FetchError::Decode {
            message: err.to_string(),
        })?;
    Ok(response.into())
}

impl ReadingSource for HttpReadingSource {
    fn fetch(&self) -> Result<Reading, FetchError> {
        debug!("querying {}", self.config.url);
        self.runtime.block_on(self.fetch_async())
    }
}
