//! Response types for the open-notify `iss-now` endpoint.
//!
//! See: <http://open-notify.org/Open-Notify-API/ISS-Location-Now/>

use issflux_core::Reading;
use serde::Deserialize;

/// `iss-now.json` response body.
///
/// Coordinates arrive as JSON strings and are kept that way.
#[derive(Debug, Deserialize)]
pub struct IssNowResponse {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Current ground position.
    pub iss_position: IssPosition,
    /// Status message, usually `"success"`. Not interpreted.
    pub message: Option<String>,
}

/// Ground position of the station.
#[derive(Debug, Deserialize)]
pub struct IssPosition {
    /// Latitude in decimal degrees.
    pub latitude: String,
    /// Longitude in decimal degrees.
    pub longitude: String,
}

impl From<IssNowResponse> for Reading {
    fn from(response: IssNowResponse) -> Self {
        Self::new(
            response.timestamp,
            response.iss_position.latitude,
            response.iss_position.longitude,
        )
    }
}
