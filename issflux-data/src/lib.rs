//! I/O adapters for the issflux relay.
//!
//! Responsibilities:
//! - Fetch readings from the upstream position service over HTTP.
//! - Write line-protocol batches to an InfluxDB v2 write endpoint.
//! - Load the write token from a plain-text credential file.
//!
//! Boundaries:
//! - Do not encode batching or loop policy (lives in `issflux-core`).
//! - Never terminate the process; every failure is returned to the caller.
//!
//! Invariants:
//! - One outbound request per `fetch` or `write` call, never retried.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod credentials;
pub mod http;

pub use credentials::{CredentialError, TokenFile};
pub use http::{
    ClientBuildError, DEFAULT_SOURCE_URL, DEFAULT_USER_AGENT, HttpLineSink, HttpReadingSource,
    HttpReadingSourceConfig, InfluxWriteConfig,
};
