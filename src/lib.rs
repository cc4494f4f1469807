//! Facade crate for the issflux telemetry relay.
//!
//! This crate re-exports the core relay types and, behind the `http`
//! feature, the reqwest-backed adapters for the position feed and InfluxDB.

#![forbid(unsafe_code)]

pub use issflux_core::{
    BatchBuffer, BatchingWriter, FetchError, IntervalTicker, LineFormat, LineSink, Pipeline,
    PipelineError, PipelineStats, Reading, ReadingSource, RecordLine, StopHandle, Ticker,
    WriteError,
};

#[cfg(feature = "http")]
pub use issflux_data::{
    ClientBuildError, CredentialError, HttpLineSink, HttpReadingSource, HttpReadingSourceConfig,
    InfluxWriteConfig, TokenFile,
};
