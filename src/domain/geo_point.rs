use serde::Serialize;
use thiserror::Error;

/// A validated position on the earth's surface, in degrees.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Returns a point if the latitude is within [-90, 90] and the longitude within [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        // Written as negated ranges so NaN is rejected too
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidCoordinate { latitude, longitude });
        }

        Ok(GeoPoint { latitude, longitude })
    }

    /// Compile-time counterpart of [`GeoPoint::new`] for fixed reference points.
    pub const fn new_const(latitude: f64, longitude: f64) -> Self {
        assert!(latitude >= -90.0 && latitude <= 90.0 && longitude >= -180.0 && longitude <= 180.0, "coordinate out of range");
        GeoPoint { latitude, longitude }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate ({latitude}, {longitude}), latitude must be between -90 and 90 and longitude between -180 and 180")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}
