//! Fetch the current reading from an upstream telemetry service.
//!
//! The `ReadingSource` trait is deliberately synchronous: the relay runs a
//! single sequential loop and each call maps to exactly one outbound request.
//! Implementations keep no state between calls and never retry.

mod error;

pub use error::FetchError;

use crate::Reading;

/// Produce one [`Reading`] per call.
///
/// # Examples
///
/// ```rust
/// use issflux_core::{FetchError, Reading, ReadingSource};
///
/// struct FixedSource;
///
/// impl ReadingSource for FixedSource {
///     fn fetch(&self) -> Result<Reading, FetchError> {
///         Ok(Reading::new(1, "0.0", "0.0"))
///     }
/// }
///
/// let reading = FixedSource.fetch()?;
/// assert_eq!(reading.timestamp, 1);
/// # Ok::<(), FetchError>(())
/// ```
pub trait ReadingSource {
    /// Fetch the current reading.
    ///
    /// Implementations must issue at most one outbound request and return
    /// any failure to the caller rather than substituting a placeholder.
    fn fetch(&self) -> Result<Reading, FetchError>;
}

impl<T: ReadingSource + ?Sized> ReadingSource for &T {
    fn fetch(&self) -> Result<Reading, FetchError> {
        (**self).fetch()
    }
}

impl<T: ReadingSource + ?Sized> ReadingSource for Box<T> {
    fn fetch(&self) -> Result<Reading, FetchError> {
        (**self).fetch()
    }
}
