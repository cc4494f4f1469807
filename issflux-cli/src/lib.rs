//! Command-line interface for the issflux telemetry relay.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod adapters;
mod error;
mod probe;
mod relay;

pub use error::CliError;

use probe::{ProbeArgs, run_probe};
use relay::{RunArgs, run_relay};

pub(crate) const ARG_RUN_ORG: &str = "org";
pub(crate) const ARG_RUN_BUCKET: &str = "bucket";
pub(crate) const ARG_RUN_URL: &str = "url";
pub(crate) const ARG_RUN_AUTH: &str = "auth";
pub(crate) const ARG_RUN_BATCH_SIZE: &str = "batch-size";
pub(crate) const ARG_RUN_INTERVAL_SECS: &str = "interval-secs";
pub(crate) const ARG_SOURCE_URL: &str = "source-url";
pub(crate) const ARG_MEASUREMENT: &str = "measurement";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ENV_RUN_BATCH_SIZE: &str = "ISSFLUX_CMDS_RUN_BATCH_SIZE";
pub(crate) const ENV_RUN_INTERVAL_SECS: &str = "ISSFLUX_CMDS_RUN_INTERVAL_SECS";
pub(crate) const ENV_RUN_MEASUREMENT: &str = "ISSFLUX_CMDS_RUN_MEASUREMENT";
pub(crate) const ENV_RUN_TIMEOUT_SECS: &str = "ISSFLUX_CMDS_RUN_TIMEOUT_SECS";
pub(crate) const ENV_PROBE_MEASUREMENT: &str = "ISSFLUX_CMDS_PROBE_MEASUREMENT";
pub(crate) const ENV_PROBE_TIMEOUT_SECS: &str = "ISSFLUX_CMDS_PROBE_TIMEOUT_SECS";

/// Run the issflux CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, when
/// the HTTP adapters cannot be built, or when the relay or probe fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Run(args) => run_relay(args),
        Command::Probe(args) => run_probe(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "issflux",
    about = "Relay International Space Station positions into InfluxDB",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Poll the position feed and write batches to InfluxDB until stopped.
    Run(RunArgs),
    /// Fetch one reading and print its record line.
    Probe(ProbeArgs),
}

/// Reject zero for settings that must be at least one.
pub(crate) fn require_positive<T: Default + PartialEq>(
    value: T,
    field: &'static str,
    env: &'static str,
) -> Result<T, CliError> {
    if value == T::default() {
        return Err(CliError::InvalidSetting {
            field,
            env,
            reason: "must be at least 1",
        });
    }
    Ok(value)
}

/// Reject blank measurement names, which would produce unparsable lines.
pub(crate) fn require_measurement(value: String, env: &'static str) -> Result<String, CliError> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(CliError::InvalidSetting {
            field: ARG_MEASUREMENT,
            env,
            reason: "must be a non-empty name without whitespace",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests;
