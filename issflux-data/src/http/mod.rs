//! HTTP adapters for the upstream position service and the InfluxDB write API.
//!
//! This module provides [`HttpReadingSource`], an implementation of
//! [`issflux_core::ReadingSource`] that polls the open-notify `iss-now`
//! endpoint, and [`HttpLineSink`], an implementation of
//! [`issflux_core::LineSink`] that posts batches to an InfluxDB v2 server.
//!
//! # Architecture
//!
//! Both core traits are synchronous so the relay loop stays a plain
//! sequential program. Each adapter owns a current-thread Tokio runtime and
//! blocks on its async `reqwest` call internally.
//!
//! # Example
//!
//! ```no_run
//! use issflux_core::{LineSink, ReadingSource};
//! use issflux_data::{HttpLineSink, HttpReadingSource, InfluxWriteConfig, TokenFile};
//!
//! let source = HttpReadingSource::new("http://api.open-notify.org/iss-now.json")?;
//! let sink = HttpLineSink::with_config(
//!     InfluxWriteConfig::new("localhost:9999", "Home", "ISS")
//!         .with_token(TokenFile::new("/etc/issflux/token")),
//! )?;
//!
//! let line = source.fetch()?.to_record_line();
//! sink.write(line.as_str())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod influx;
mod open_notify;
mod runtime;
mod source;

pub use error::ClientBuildError;
pub use influx::{
    DEFAULT_BUCKET, DEFAULT_INFLUX_URL, DEFAULT_ORG, HttpLineSink, InfluxWriteConfig,
};
pub use source::{DEFAULT_SOURCE_URL, HttpReadingSource, HttpReadingSourceConfig};

/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "issflux/0.1";
