//! Deliver a batch of record lines to the time-series store.

mod error;

pub use error::WriteError;

/// Accept one batch body per call.
///
/// The body is the concatenation of newline-terminated record lines. Sinks
/// send it as a single request and report any failure; they never retry and
/// never inspect a successful response beyond its status.
pub trait LineSink {
    /// Write `body` to the store.
    fn write(&self, body: &str) -> Result<(), WriteError>;
}

impl<T: LineSink + ?Sized> LineSink for &T {
    fn write(&self, body: &str) -> Result<(), WriteError> {
        (**self).write(body)
    }
}

impl<T: LineSink + ?Sized> LineSink for Box<T> {
    fn write(&self, body: &str) -> Result<(), WriteError> {
        (**self).write(body)
    }
}
