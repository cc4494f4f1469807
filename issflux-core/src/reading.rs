//! Point-in-time readings and their line-protocol rendering.

use std::fmt;

/// Measurement name written for every record unless overridden.
pub const DEFAULT_MEASUREMENT: &str = "iss_position";

/// A single observation of the station's position.
///
/// Latitude and longitude are kept as the decimal text supplied by the
/// upstream service. They are never parsed, so the stored value is written
/// back out exactly as received.
///
/// # Examples
///
/// ```
/// use issflux_core::Reading;
///
/// let reading = Reading::new(1_700_000_000, "51.5072", "-0.1276");
/// assert_eq!(
///     reading.to_record_line().as_str(),
///     "iss_position latitude=51.5072,longitude=-0.1276 1700000000\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Latitude in decimal degrees, as text.
    pub latitude: String,
    /// Longitude in decimal degrees, as text.
    pub longitude: String,
}

impl Reading {
    /// Construct a reading from its parts.
    #[must_use]
    pub fn new(timestamp: i64, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            timestamp,
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Render this reading with the default measurement name.
    #[must_use]
    pub fn to_record_line(&self) -> RecordLine {
        LineFormat::default().format(self)
    }
}

/// How readings are rendered as record lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    measurement: String,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self::new(DEFAULT_MEASUREMENT)
    }
}

impl LineFormat {
    /// Use `measurement` as the leading name of every line.
    #[must_use]
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
        }
    }

    /// Measurement name written at the start of each line.
    #[must_use]
    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    /// Render `reading` as `<measurement> latitude=..,longitude=.. <ts>\n`.
    #[must_use]
    pub fn format(&self, reading: &Reading) -> RecordLine {
        RecordLine(format!(
            "{} latitude={},longitude={} {}\n",
            self.measurement, reading.latitude, reading.longitude, reading.timestamp
        ))
    }
}

/// One newline-terminated line-protocol record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine(String);

impl RecordLine {
    /// Borrow the line, including its trailing newline.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the line and return the owned text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RecordLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
