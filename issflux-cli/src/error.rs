//! Error types emitted by the issflux CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use issflux_core::{FetchError, PipelineError};
use issflux_data::ClientBuildError;
use thiserror::Error;

/// Errors emitted by the issflux CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A merged setting is out of range.
    #[error("invalid {field}: {reason} (set --{field} or {env})")]
    InvalidSetting {
        /// Flag naming the setting.
        field: &'static str,
        /// Environment variable naming the setting.
        env: &'static str,
        /// What is wrong with the value.
        reason: &'static str,
    },
    /// Constructing the upstream reading source failed.
    #[error("failed to build reading source for {url:?}: {source}")]
    BuildReadingSource {
        /// Configured upstream URL.
        url: String,
        /// Underlying construction failure.
        #[source]
        source: ClientBuildError,
    },
    /// Constructing the InfluxDB sink failed.
    #[error("failed to build InfluxDB sink for {url:?}: {source}")]
    BuildLineSink {
        /// Configured server base URL.
        url: String,
        /// Underlying construction failure.
        #[source]
        source: ClientBuildError,
    },
    /// The relay stopped on a fetch or write failure.
    #[error("relay failed: {0}")]
    Relay(#[from] PipelineError),
    /// The probe could not fetch a reading.
    #[error("probe failed: {0}")]
    Probe(#[source] FetchError),
    /// Writing the probe output failed.
    #[error("failed to write probe output: {0}")]
    WriteProbeOutput(#[source] std::io::Error),
}
