//! Geographic coordinate value type

use serde::{Deserialize, Serialize};

use crate::EcoRideError;

/// A point on the globe in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees, -90 to 90
    pub latitude: f64,
    /// Longitude in decimal degrees, -180 to 180
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are in range. NaN is never in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Check the coordinate ranges, naming the offending component
    pub fn validate(&self) -> Result<(), EcoRideError> {
        if self.is_valid() {
            return Ok(());
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(EcoRideError::validation(
                "Latitude must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(EcoRideError::validation(
                "Longitude must be between -180 and 180",
            ));
        }
        Ok(())
    }

    /// Format coordinate as a short string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
