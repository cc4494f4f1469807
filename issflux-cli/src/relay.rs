//! `run` command: relay readings into InfluxDB until stopped.

use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use issflux_core::{
    DEFAULT_BATCH_THRESHOLD, DEFAULT_INTERVAL, IntervalTicker, LineFormat, Pipeline,
    PipelineStats, Ticker,
};
use issflux_data::{HttpReadingSourceConfig, InfluxWriteConfig, TokenFile};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::adapters::{AdapterBuilder, HttpAdapterBuilder};
use crate::{
    ARG_MEASUREMENT, ARG_RUN_AUTH, ARG_RUN_BATCH_SIZE, ARG_RUN_BUCKET, ARG_RUN_INTERVAL_SECS,
    ARG_RUN_ORG, ARG_RUN_URL, ARG_SOURCE_URL, ARG_TIMEOUT_SECS, CliError, ENV_RUN_BATCH_SIZE,
    ENV_RUN_INTERVAL_SECS, ENV_RUN_MEASUREMENT, ENV_RUN_TIMEOUT_SECS, require_measurement,
    require_positive,
};

/// CLI arguments for the `run` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Poll the station position feed on a fixed interval, render \
                 each reading as an InfluxDB line-protocol record and write \
                 the records in batches. Settings can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Relay station positions into InfluxDB"
)]
#[ortho_config(prefix = "ISSFLUX")]
pub(crate) struct RunArgs {
    /// Organisation owning the destination bucket.
    #[arg(long = ARG_RUN_ORG, value_name = "name")]
    #[serde(default)]
    pub(crate) org: Option<String>,
    /// Destination bucket.
    #[arg(long = ARG_RUN_BUCKET, value_name = "name")]
    #[serde(default)]
    pub(crate) bucket: Option<String>,
    /// InfluxDB server address (e.g. "localhost:9999").
    #[arg(long = ARG_RUN_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) url: Option<String>,
    /// File holding the write token. Re-read before every write.
    #[arg(long = ARG_RUN_AUTH, value_name = "path")]
    #[serde(default)]
    pub(crate) auth: Option<Utf8PathBuf>,
    /// Number of records written per request.
    #[arg(long = ARG_RUN_BATCH_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) batch_size: Option<usize>,
    /// Seconds to wait between polls.
    #[arg(long = ARG_RUN_INTERVAL_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) interval_secs: Option<u64>,
    /// Endpoint returning the current position as JSON.
    #[arg(long = ARG_SOURCE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) source_url: Option<String>,
    /// Measurement name written at the start of every record.
    #[arg(long = ARG_MEASUREMENT, value_name = "name")]
    #[serde(default)]
    pub(crate) measurement: Option<String>,
    /// Per-request timeout in seconds. Unset waits indefinitely.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl RunArgs {
    pub(crate) fn into_config(self) -> Result<RunConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RunConfig::try_from(merged)
    }
}

/// Resolved `run` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunConfig {
    /// Upstream position feed.
    pub(crate) source: HttpReadingSourceConfig,
    /// InfluxDB write target.
    pub(crate) influx: InfluxWriteConfig,
    /// Records per write.
    pub(crate) batch_size: usize,
    /// Pause between polls.
    pub(crate) interval: Duration,
    /// Record rendering.
    pub(crate) format: LineFormat,
}

impl TryFrom<RunArgs> for RunConfig {
    type Error = CliError;

    fn try_from(args: RunArgs) -> Result<Self, Self::Error> {
        let batch_size = require_positive(
            args.batch_size.unwrap_or(DEFAULT_BATCH_THRESHOLD),
            ARG_RUN_BATCH_SIZE,
            ENV_RUN_BATCH_SIZE,
        )?;
        let interval_secs = require_positive(
            args.interval_secs.unwrap_or(DEFAULT_INTERVAL.as_secs()),
            ARG_RUN_INTERVAL_SECS,
            ENV_RUN_INTERVAL_SECS,
        )?;
        let timeout = args
            .timeout_secs
            .map(|secs| require_positive(secs, ARG_TIMEOUT_SECS, ENV_RUN_TIMEOUT_SECS))
            .transpose()?
            .map(Duration::from_secs);
        let measurement = args
            .measurement
            .unwrap_or_else(|| LineFormat::default().measurement().to_owned());
        let format = LineFormat::new(require_measurement(measurement, ENV_RUN_MEASUREMENT)?);

        let mut source = HttpReadingSourceConfig::default().with_timeout(timeout);
        if let Some(url) = args.source_url {
            source.url = url;
        }

        let mut influx = InfluxWriteConfig::default()
            .with_token(TokenFile::from(args.auth))
            .with_timeout(timeout);
        if let Some(url) = args.url {
            influx.base_url = url;
        }
        if let Some(org) = args.org {
            influx.org = org;
        }
        if let Some(bucket) = args.bucket {
            influx.bucket = bucket;
        }

        Ok(Self {
            source,
            influx,
            batch_size,
            interval: Duration::from_secs(interval_secs),
            format,
        })
    }
}

pub(super) fn run_relay(args: RunArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    // The handle is never used; holding it keeps the ticker running until
    // the process is killed.
    let (ticker, _stop) = IntervalTicker::new(config.interval);
    run_relay_with(&config, &HttpAdapterBuilder, ticker)?;
    Ok(())
}

pub(super) fn run_relay_with<T: Ticker>(
    config: &RunConfig,
    builder: &dyn AdapterBuilder,
    ticker: T,
) -> Result<PipelineStats, CliError> {
    let source = builder.reading_source(&config.source)?;
    let sink = builder.line_sink(&config.influx)?;
    info!(
        "relaying {} into bucket {} of org {} at {}",
        config.source.url, config.influx.bucket, config.influx.org, config.influx.base_url
    );
    let mut pipeline = Pipeline::new(source, sink)
        .with_threshold(config.batch_size)
        .with_format(config.format.clone());
    Ok(pipeline.run(ticker)?)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RunConfig, CliError> {
    let merged = RunArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RunConfig::try_from(merged)
}
