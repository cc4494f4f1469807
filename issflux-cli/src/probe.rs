//! `probe` command: fetch one reading and print its record line.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use issflux_core::{LineFormat, ReadingSource};
use issflux_data::HttpReadingSourceConfig;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::adapters::{AdapterBuilder, HttpAdapterBuilder};
use crate::{
    ARG_MEASUREMENT, ARG_SOURCE_URL, ARG_TIMEOUT_SECS, CliError, ENV_PROBE_MEASUREMENT,
    ENV_PROBE_TIMEOUT_SECS, require_measurement, require_positive,
};

/// CLI arguments for the `probe` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch a single reading from the position feed and print \
                 the record line that `run` would write. Nothing is sent to \
                 InfluxDB.",
    about = "Print one record line without writing it"
)]
#[ortho_config(prefix = "ISSFLUX")]
pub(crate) struct ProbeArgs {
    /// Endpoint returning the current position as JSON.
    #[arg(long = ARG_SOURCE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) source_url: Option<String>,
    /// Measurement name written at the start of the record.
    #[arg(long = ARG_MEASUREMENT, value_name = "name")]
    #[serde(default)]
    pub(crate) measurement: Option<String>,
    /// Request timeout in seconds. Unset waits indefinitely.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ProbeArgs {
    pub(crate) fn into_config(self) -> Result<ProbeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ProbeConfig::try_from(merged)
    }
}

/// Resolved `probe` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProbeConfig {
    pub(crate) source: HttpReadingSourceConfig,
    pub(crate) format: LineFormat,
}

impl TryFrom<ProbeArgs> for ProbeConfig {
    type Error = CliError;

    fn try_from(args: ProbeArgs) -> Result<Self, Self::Error> {
        let timeout = args
            .timeout_secs
            .map(|secs| require_positive(secs, ARG_TIMEOUT_SECS, ENV_PROBE_TIMEOUT_SECS))
            .transpose()?
            .map(Duration::from_secs);
        let measurement = args
            .measurement
            .unwrap_or_else(|| LineFormat::default().measurement().to_owned());

        let mut source = HttpReadingSourceConfig::default().with_timeout(timeout);
        if let Some(url) = args.source_url {
            source.url = url;
        }

        Ok(Self {
            source,
            format: LineFormat::new(require_measurement(measurement, ENV_PROBE_MEASUREMENT)?),
        })
    }
}

pub(super) fn run_probe(args: ProbeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_probe_with(args, &HttpAdapterBuilder, &mut stdout)
}

pub(super) fn run_probe_with(
    args: ProbeArgs,
    builder: &dyn AdapterBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let source = builder.reading_source(&config.source)?;
    debug!("probing {}", config.source.url);
    let reading = source.fetch().map_err(CliError::Probe)?;
    let line = config.format.format(&reading);
    writer
        .write_all(line.as_str().as_bytes())
        .map_err(CliError::WriteProbeOutput)?;
    writer.flush().map_err(CliError::WriteProbeOutput)
}
