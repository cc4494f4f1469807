//! The poll, format, batch, flush loop.

use log::{debug, info};
use thiserror::Error;

use crate::batch::{BatchingWriter, DEFAULT_BATCH_THRESHOLD};
use crate::reading::LineFormat;
use crate::sink::{LineSink, WriteError};
use crate::source::{FetchError, ReadingSource};
use crate::ticker::Ticker;

/// Failures that end a pipeline run.
///
/// Neither variant is retried; the caller decides whether to terminate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Fetching a reading failed.
    #[error("failed to fetch reading: {0}")]
    Fetch(#[from] FetchError),
    /// Flushing a batch failed.
    #[error("failed to write batch: {0}")]
    Write(#[from] WriteError),
}

/// Counters reported when a run ends cleanly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    /// Readings fetched and appended.
    pub readings: u64,
    /// Batches written to the sink.
    pub flushes: u64,
}

/// Sequential relay from a [`ReadingSource`] to a [`LineSink`].
///
/// The pipeline owns both ends and the batch buffer between them, so there
/// is exactly one place where buffered state lives.
#[derive(Debug)]
pub struct Pipeline<R, S> {
    source: R,
    writer: BatchingWriter<S>,
    format: LineFormat,
    threshold: usize,
    stats: PipelineStats,
}

impl<R: ReadingSource, S: LineSink> Pipeline<R, S> {
    /// Build a pipeline with the default threshold and line format.
    pub fn new(source: R, sink: S) -> Self {
        Self {
            source,
            writer: BatchingWriter::new(sink),
            format: LineFormat::default(),
            threshold: DEFAULT_BATCH_THRESHOLD,
            stats: PipelineStats::default(),
        }
    }

    /// Flush once `threshold` lines are buffered. Values below one are
    /// treated as one.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold.max(1);
        self
    }

    /// Render readings with `format`.
    #[must_use]
    pub fn with_format(mut self, format: LineFormat) -> Self {
        self.format = format;
        self
    }

    /// Run one fetch, format, append, maybe-flush cycle.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Fetch`] before anything is appended when the
    /// source fails, and [`PipelineError::Write`] with the buffer intact when
    /// the flush fails.
    pub fn step(&mut self) -> Result<(), PipelineError> {
        debug!("querying reading source");
        let reading = self.source.fetch()?;
        let line = self.format.format(&reading);
        debug!("reading converted to line protocol: {}", line.as_str().trim_end());

        self.writer.append(line.as_str());
        self.stats.readings += 1;

        if self.writer.maybe_flush(self.threshold)? {
            self.stats.flushes += 1;
        }
        Ok(())
    }

    /// Loop until `ticker` is cancelled, then write any partial batch.
    ///
    /// # Errors
    ///
    /// Stops at the first [`PipelineError`]; buffered lines stay in place.
    pub fn run<T: Ticker>(&mut self, mut ticker: T) -> Result<PipelineStats, PipelineError> {
        info!(
            "relay started (batch threshold {}, measurement {})",
            self.threshold,
            self.format.measurement()
        );
        loop {
            self.step()?;
            if !ticker.tick() {
                break;
            }
        }
        self.drain()?;
        info!(
            "relay stopped after {} readings and {} flushes",
            self.stats.readings, self.stats.flushes
        );
        Ok(self.stats)
    }

    /// Write whatever is buffered, regardless of the threshold.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Write`] when the flush fails.
    pub fn drain(&mut self) -> Result<(), PipelineError> {
        if self.writer.buffer().is_empty() {
            return Ok(());
        }
        self.writer.flush()?;
        self.stats.flushes += 1;
        Ok(())
    }

    /// Batching writer holding the unflushed lines.
    pub const fn writer(&self) -> &BatchingWriter<S> {
        &self.writer
    }

    /// Counters so far.
    pub const fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Configured flush threshold.
    pub const fn threshold(&self) -> usize {
        self.threshold
    }
}
