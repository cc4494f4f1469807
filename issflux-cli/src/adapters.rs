//! Construction of the upstream source and InfluxDB sink.
//!
//! Commands receive a builder rather than constructing adapters directly so
//! tests can substitute in-memory doubles.

use issflux_core::{LineSink, ReadingSource};
use issflux_data::{HttpLineSink, HttpReadingSource, HttpReadingSourceConfig, InfluxWriteConfig};

use crate::CliError;

/// Builds the adapters for the current invocation.
pub(crate) trait AdapterBuilder {
    fn reading_source(
        &self,
        config: &HttpReadingSourceConfig,
    ) -> Result<Box<dyn ReadingSource>, CliError>;

    fn line_sink(&self, config: &InfluxWriteConfig) -> Result<Box<dyn LineSink>, CliError>;
}

/// Builds the reqwest-backed adapters.
pub(crate) struct HttpAdapterBuilder;

impl AdapterBuilder for HttpAdapterBuilder {
    fn reading_source(
        &self,
        config: &HttpReadingSourceConfig,
    ) -> Result<Box<dyn ReadingSource>, CliError> {
        let source = HttpReadingSource::with_config(config.clone()).map_err(|source| {
            CliError::BuildReadingSource {
                url: config.url.clone(),
                source,
            }
        })?;
        Ok(Box::new(source))
    }

    fn line_sink(&self, config: &InfluxWriteConfig) -> Result<Box<dyn LineSink>, CliError> {
        let sink = HttpLineSink::with_config(config.clone()).map_err(|source| {
            CliError::BuildLineSink {
                url: config.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(sink))
    }
}
