//! Focused unit tests covering CLI parsing and configuration resolution.

use super::helpers::{StubAdapterBuilder, feed_reading};
use super::*;
use crate::probe::{ProbeArgs, ProbeConfig, run_probe_with};
use crate::relay::{RunArgs, RunConfig, config_from_layers_for_test, run_relay_with};
use camino::Utf8PathBuf;
use issflux_core::test_support::CountedTicker;
use issflux_core::{FetchError, PipelineError};
use issflux_data::{DEFAULT_SOURCE_URL, TokenFile};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;
use std::time::Duration;

#[rstest]
fn run_config_applies_documented_defaults() {
    let config = RunConfig::try_from(RunArgs::default()).expect("defaults should resolve");

    assert_eq!(config.batch_size, 100);
    assert_eq!(config.interval, Duration::from_secs(1));
    assert_eq!(config.format.measurement(), "iss_position");
    assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
    assert_eq!(config.source.timeout, None);
    assert_eq!(config.influx.base_url, "localhost:9999");
    assert_eq!(config.influx.org, "Home");
    assert_eq!(config.influx.bucket, "ISS");
    assert_eq!(config.influx.token, TokenFile::none());
    assert_eq!(config.influx.timeout, None);
}

#[rstest]
fn run_config_carries_overrides_to_both_adapters() {
    let args = RunArgs {
        org: Some("Lab".to_owned()),
        bucket: Some("orbit".to_owned()),
        url: Some("https://influx.example.com".to_owned()),
        auth: Some(Utf8PathBuf::from("/etc/issflux/token")),
        timeout_secs: Some(5),
        source_url: Some("http://127.0.0.1:8080/iss-now.json".to_owned()),
        ..RunArgs::default()
    };

    let config = RunConfig::try_from(args).expect("config should resolve");

    assert_eq!(config.influx.org, "Lab");
    assert_eq!(config.influx.bucket, "orbit");
    assert_eq!(config.influx.base_url, "https://influx.example.com");
    assert_eq!(config.influx.token, TokenFile::new("/etc/issflux/token"));
    assert_eq!(config.influx.timeout, Some(Duration::from_secs(5)));
    assert_eq!(config.source.url, "http://127.0.0.1:8080/iss-now.json");
    assert_eq!(config.source.timeout, Some(Duration::from_secs(5)));
}

#[rstest]
#[case::batch_size(
    RunArgs { batch_size: Some(0), ..RunArgs::default() },
    ARG_RUN_BATCH_SIZE,
    ENV_RUN_BATCH_SIZE
)]
#[case::interval(
    RunArgs { interval_secs: Some(0), ..RunArgs::default() },
    ARG_RUN_INTERVAL_SECS,
    ENV_RUN_INTERVAL_SECS
)]
#[case::timeout(
    RunArgs { timeout_secs: Some(0), ..RunArgs::default() },
    ARG_TIMEOUT_SECS,
    ENV_RUN_TIMEOUT_SECS
)]
#[case::blank_measurement(
    RunArgs { measurement: Some(String::new()), ..RunArgs::default() },
    ARG_MEASUREMENT,
    ENV_RUN_MEASUREMENT
)]
#[case::spaced_measurement(
    RunArgs { measurement: Some("iss position".to_owned()), ..RunArgs::default() },
    ARG_MEASUREMENT,
    ENV_RUN_MEASUREMENT
)]
fn run_config_rejects_out_of_range_settings(
    #[case] args: RunArgs,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let err = RunConfig::try_from(args).expect_err("setting should be rejected");
    match err {
        CliError::InvalidSetting { field, env, .. } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected InvalidSetting, found {other:?}"),
    }
}

#[rstest]
fn probe_config_defaults_to_public_feed() {
    let config = ProbeConfig::try_from(ProbeArgs::default()).expect("defaults should resolve");

    assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
    assert_eq!(config.source.timeout, None);
    assert_eq!(config.format.measurement(), "iss_position");
}

#[rstest]
fn probe_config_rejects_zero_timeout() {
    let args = ProbeArgs {
        timeout_secs: Some(0),
        ..ProbeArgs::default()
    };

    let err = ProbeConfig::try_from(args).expect_err("zero timeout should be rejected");
    match err {
        CliError::InvalidSetting { field, env, .. } => {
            assert_eq!(field, ARG_TIMEOUT_SECS);
            assert_eq!(env, ENV_PROBE_TIMEOUT_SECS);
        }
        other => panic!("expected InvalidSetting, found {other:?}"),
    }
}

#[rstest]
fn parses_run_flags() {
    let cli = Cli::try_parse_from([
        "issflux",
        "run",
        "--org",
        "Lab",
        "--auth",
        "token.txt",
        "--batch-size",
        "7",
    ])
    .expect("arguments should parse");

    match cli.command {
        Command::Run(args) => {
            assert_eq!(args.org.as_deref(), Some("Lab"));
            assert_eq!(args.auth, Some(Utf8PathBuf::from("token.txt")));
            assert_eq!(args.batch_size, Some(7));
            assert_eq!(args.bucket, None);
        }
        Command::Probe(_) => panic!("expected run command"),
    }
}

#[rstest]
#[case::not_a_number(&["issflux", "run", "--batch-size", "many"])]
#[case::unknown_flag(&["issflux", "probe", "--bucket", "ISS"])]
#[case::missing_subcommand(&["issflux"])]
fn rejects_malformed_arguments(#[case] argv: &[&str]) {
    let err = Cli::try_parse_from(argv.iter().copied())
        .expect_err("arguments should be rejected");

    assert!(matches!(CliError::from(err), CliError::ArgumentParsing(_)));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "batch_size": "many" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "org": "from-file",
            "bucket": "file-bucket",
            "url": "http://from-file:8086",
        }),
        None,
    );
    composer.push_environment(json!({
        "bucket": "env-bucket",
        "batch_size": 10,
    }));
    composer.push_cli(json!({
        "batch_size": 5,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.influx.org, "from-file");
    assert_eq!(config.influx.bucket, "env-bucket");
    assert_eq!(config.influx.base_url, "http://from-file:8086");
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.interval, Duration::from_secs(1));
}

#[rstest]
fn relay_hands_resolved_settings_to_the_builder() {
    let args = RunArgs {
        bucket: Some("orbit".to_owned()),
        source_url: Some("http://feed.local/iss-now.json".to_owned()),
        ..RunArgs::default()
    };
    let config = RunConfig::try_from(args).expect("config should resolve");
    let builder = StubAdapterBuilder::new(vec![Ok(feed_reading(0))]);

    let stats =
        run_relay_with(&config, &builder, CountedTicker::new(0)).expect("relay should stop");

    assert_eq!(stats.readings, 1);
    assert_eq!(stats.flushes, 1);
    let source = builder.last_source_config().expect("source built");
    assert_eq!(source.url, "http://feed.local/iss-now.json");
    let sink = builder.last_sink_config().expect("sink built");
    assert_eq!(sink.bucket, "orbit");
}

#[rstest]
fn relay_reports_fetch_failures() {
    let config = RunConfig::try_from(RunArgs::default()).expect("defaults should resolve");
    let builder = StubAdapterBuilder::new(vec![Err(FetchError::Http {
        url: DEFAULT_SOURCE_URL.to_owned(),
        status: 503,
        message: "service unavailable".to_owned(),
    })]);

    let err = run_relay_with(&config, &builder, CountedTicker::new(3))
        .expect_err("fetch failure should stop the relay");

    match err {
        CliError::Relay(PipelineError::Fetch(FetchError::Http { status, .. })) => {
            assert_eq!(status, 503);
        }
        other => panic!("expected fetch failure, found {other:?}"),
    }
    assert_eq!(builder.write_attempts(), 0);
}

#[rstest]
fn probe_reports_write_failures() {
    struct BrokenPipe;

    impl std::io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let builder = StubAdapterBuilder::new(vec![Ok(feed_reading(0))]);

    let err = run_probe_with(ProbeArgs::default(), &builder, &mut BrokenPipe)
        .expect_err("write should fail");

    assert!(matches!(err, CliError::WriteProbeOutput(_)));
}
