//! HTTP-based `LineSink` posting to the InfluxDB v2 write API.
//!
//! Each batch becomes one `POST {base}/api/v2/write?org=..&bucket=..&precision=s`
//! carrying the record lines as a `text/plain` body and an
//! `Authorization: Token <secret>` header.
//!
//! See: <https://docs.influxdata.com/influxdb/v2/api/#operation/PostWrite>

use std::time::Duration;

use issflux_core::{LineSink, WriteError};
use log::info;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use super::runtime::BlockingRuntime;
use super::{ClientBuildError, DEFAULT_USER_AGENT};
use crate::credentials::TokenFile;

/// Server address used when none is configured.
pub const DEFAULT_INFLUX_URL: &str = "localhost:9999";
/// Organisation owning the bucket unless configured otherwise.
pub const DEFAULT_ORG: &str = "Home";
/// Destination bucket unless configured otherwise.
pub const DEFAULT_BUCKET: &str = "ISS";

const WRITE_PATH: &str = "api/v2/write";
const PRECISION_SECONDS: &str = "s";

/// Configuration for [`HttpLineSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluxWriteConfig {
    /// Server base URL. A missing scheme means `http://`.
    pub base_url: String,
    /// Organisation that owns the bucket.
    pub org: String,
    /// Destination bucket.
    pub bucket: String,
    /// Where the write token is read from.
    pub token: TokenFile,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for InfluxWriteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_INFLUX_URL.to_owned(),
            org: DEFAULT_ORG.to_owned(),
            bucket: DEFAULT_BUCKET.to_owned(),
            token: TokenFile::none(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl InfluxWriteConfig {
    /// Create a configuration writing to `bucket` in `org` on `base_url`.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        org: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            org: org.into(),
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Read the write token from `token`.
    #[must_use]
    pub fn with_token(mut self, token: TokenFile) -> Self {
        self.token = token;
        self
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

    /// Build the full write endpoint including query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::InvalidUrl`] when the base URL does not
    /// parse.
    pub fn write_url(&self) -> Result<Url, ClientBuildError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let base = if trimmed.contains("://") {
            trimmed.to_owned()
        } else {
            format!("http://{trimmed}")
        };
        let mut url = Url::parse(&format!("{base}/{WRITE_PATH}")).map_err(|source| {
            ClientBuildError::InvalidUrl {
                url: self.base_url.clone(),
                source,
            }
        })?;
        url.query_pairs_mut()
            .append_pair("org", &self.org)
            .append_pair("bucket", &self.bucket)
            .append_pair("precision", PRECISION_SECONDS);
        Ok(url)
    }
}

/// Writes each batch with one POST to the InfluxDB write API.
#[derive(Debug)]
pub struct HttpLineSink {
    client: Client,
    endpoint: Url,
    config: InfluxWriteConfig,
    runtime: BlockingRuntime,
}

impl HttpLineSink {
    /// Create a sink with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint does not parse or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: InfluxWriteConfig) -> Result<Self, ClientBuildError> {
        let endpoint = config.write_url()?;
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        let client = builder.build().map_err(ClientBuildError::HttpClient)?;
        let runtime = BlockingRuntime::new()?;
        Ok(Self {
            client,
            endpoint,
            config,
            runtime,
        })
    }

    /// Fully qualified write endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn write_async(&self, body: &str) -> Result<(), WriteError> {
        let token = self.config.token.resolve();
        self.client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Token {token}"))
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body.to_owned())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;
        Ok(())
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> WriteError {
        let url = self.endpoint.to_string();
        if error.is_timeout() {
            return WriteError::Timeout {
                url,
                timeout_secs: self.config.timeout.map_or(0, |timeout| timeout.as_secs()),
            };
        }

        if let Some(status) = error.status() {
            return WriteError::Http {
                url,
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        WriteError::Network {
            url,
            message: error.to_string(),
        }
    }
}

impl LineSink for HttpLineSink {
    fn write(&self, body: &str) -> Result<(), WriteError> {
        self.runtime.block_on(self.write_async(body))?;
        info!("batch written to {}", self.endpoint);
        Ok(())
    }
}
