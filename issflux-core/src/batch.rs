//! Batch record lines in memory and flush them as one write.
//!
//! Batching amortises the fixed cost of a write request across many points.
//! The price is bounded loss: anything still buffered when the process dies
//! is gone.

use log::{debug, info};

use crate::sink::{LineSink, WriteError};

/// Number of buffered lines that triggers a flush unless configured otherwise.
pub const DEFAULT_BATCH_THRESHOLD: usize = 100;

/// Append-only text accumulator with a record counter.
///
/// `len()` always equals the number of lines appended since the buffer was
/// last cleared.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchBuffer {
    body: String,
    count: usize,
}

impl BatchBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            body: String::new(),
            count: 0,
        }
    }

    /// Append one line and bump the counter. The line is not validated.
    pub fn push(&mut self, line: &str) {
        self.body.push_str(line);
        self.count += 1;
    }

    /// Number of lines appended since the last clear.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no lines are buffered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Concatenated buffered lines in append order.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Drop all buffered lines and reset the counter.
    pub fn clear(&mut self) {
        self.body.clear();
        self.count = 0;
    }
}

/// Owns a [`BatchBuffer`] and the [`LineSink`] it flushes into.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use issflux_core::{BatchingWriter, LineSink, WriteError};
///
/// #[derive(Default)]
/// struct Collect(RefCell<Vec<String>>);
///
/// impl LineSink for Collect {
///     fn write(&self, body: &str) -> Result<(), WriteError> {
///         self.0.borrow_mut().push(body.to_owned());
///         Ok(())
///     }
/// }
///
/// let mut writer = BatchingWriter::new(Collect::default());
/// writer.append("a\n");
/// writer.append("b\n");
/// assert!(writer.maybe_flush(2)?);
/// assert_eq!(*writer.sink().0.borrow(), ["a\nb\n"]);
/// assert!(writer.buffer().is_empty());
/// # Ok::<(), WriteError>(())
/// ```
#[derive(Debug)]
pub struct BatchingWriter<S> {
    sink: S,
    buffer: BatchBuffer,
}

impl<S: LineSink> BatchingWriter<S> {
    /// Create a writer with an empty buffer.
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            buffer: BatchBuffer::new(),
        }
    }

    /// Append one record line to the buffer.
    pub fn append(&mut self, line: &str) {
        self.buffer.push(line);
        debug!("data points in buffer: {}", self.buffer.len());
    }

    /// Flush if at least `threshold` lines are buffered.
    ///
    /// Returns `Ok(true)` when a flush happened and `Ok(false)` when the
    /// buffer was left untouched.
    ///
    /// # Errors
    ///
    /// Propagates the [`WriteError`] from [`Self::flush`].
    pub fn maybe_flush(&mut self, threshold: usize) -> Result<bool, WriteError> {
        if self.buffer.len() < threshold {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Send the whole buffer as one write, then clear it.
    ///
    /// An empty buffer is not sent. On failure the buffer and counter are
    /// left exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns the sink's [`WriteError`] when the write fails.
    pub fn flush(&mut self) -> Result<(), WriteError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        info!("writing {} data points to sink", self.buffer.len());
        self.sink.write(self.buffer.as_str())?;
        self.buffer.clear();
        debug!("buffer reset");
        Ok(())
    }

    /// Current buffer contents.
    pub const fn buffer(&self) -> &BatchBuffer {
        &self.buffer
    }

    /// Borrow the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the writer, discarding anything still buffered.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
