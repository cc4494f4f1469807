//! Test doubles for the adapter builder.

use super::*;
use crate::adapters::AdapterBuilder;
use issflux_core::test_support::{RecordingSink, StubReadingSource};
use issflux_core::{FetchError, LineSink, Reading, ReadingSource, WriteError};
use issflux_data::{HttpReadingSourceConfig, InfluxWriteConfig};
use std::cell::RefCell;
use std::rc::Rc;

pub(super) const FEED_TIMESTAMP: i64 = 1_594_814_720;

pub(super) fn feed_reading(offset: i64) -> Reading {
    Reading::new(FEED_TIMESTAMP + offset, "-37.4312", "146.7752")
}

/// Shares one [`RecordingSink`] between the builder and the assertions.
struct SharedSink(Rc<RecordingSink>);

impl LineSink for SharedSink {
    fn write(&self, body: &str) -> Result<(), WriteError> {
        self.0.write(body)
    }
}

/// Hands out stub adapters and remembers the configuration it was given.
#[derive(Debug)]
pub(super) struct StubAdapterBuilder {
    readings: Vec<Result<Reading, FetchError>>,
    sink: Rc<RecordingSink>,
    source_configs: RefCell<Vec<HttpReadingSourceConfig>>,
    sink_configs: RefCell<Vec<InfluxWriteConfig>>,
}

impl StubAdapterBuilder {
    pub(super) fn new(readings: Vec<Result<Reading, FetchError>>) -> Self {
        Self::with_sink(readings, RecordingSink::default())
    }

    pub(super) fn with_sink(
        readings: Vec<Result<Reading, FetchError>>,
        sink: RecordingSink,
    ) -> Self {
        Self {
            readings,
            sink: Rc::new(sink),
            source_configs: RefCell::new(Vec::new()),
            sink_configs: RefCell::new(Vec::new()),
        }
    }

    pub(super) fn written_bodies(&self) -> Vec<String> {
        self.sink.bodies()
    }

    pub(super) fn write_attempts(&self) -> usize {
        self.sink.attempts()
    }

    pub(super) fn last_source_config(&self) -> Option<HttpReadingSourceConfig> {
        self.source_configs.borrow().last().cloned()
    }

    pub(super) fn last_sink_config(&self) -> Option<InfluxWriteConfig> {
        self.sink_configs.borrow().last().cloned()
    }
}

impl AdapterBuilder for StubAdapterBuilder {
    fn reading_source(
        &self,
        config: &HttpReadingSourceConfig,
    ) -> Result<Box<dyn ReadingSource>, CliError> {
        self.source_configs.borrow_mut().push(config.clone());
        Ok(Box::new(StubReadingSource::from_results(
            self.readings.clone(),
        )))
    }

    fn line_sink(&self, config: &InfluxWriteConfig) -> Result<Box<dyn LineSink>, CliError> {
        self.sink_configs.borrow_mut().push(config.clone());
        Ok(Box::new(SharedSink(Rc::clone(&self.sink))))
    }
}
