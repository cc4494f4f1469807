//! Core domain types for the issflux telemetry relay.
//!
//! A [`ReadingSource`] produces [`Reading`] values, each of which is rendered
//! as one line-protocol [`RecordLine`]. Lines accumulate in a
//! [`BatchingWriter`] until a threshold is reached, at which point the whole
//! batch is handed to a [`LineSink`] in a single write. [`Pipeline`] wires the
//! two together and paces iterations with a [`Ticker`].
//!
//! Nothing in this crate performs I/O on its own. HTTP adapters live in
//! `issflux-data`; the decision to terminate the process on error belongs to
//! the binary.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod batch;
mod pipeline;
mod reading;
pub mod sink;
pub mod source;
mod ticker;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use batch::{BatchBuffer, BatchingWriter, DEFAULT_BATCH_THRESHOLD};
pub use pipeline::{Pipeline, PipelineError, PipelineStats};
pub use reading::{DEFAULT_MEASUREMENT, LineFormat, Reading, RecordLine};
pub use sink::{LineSink, WriteError};
pub use source::{FetchError, ReadingSource};
pub use ticker::{DEFAULT_INTERVAL, IntervalTicker, StopHandle, Ticker};
