//! `EcoRide` - Nearby bikes and scooters, and the CO2 you save by riding them
//!
//! This library queries several mobility providers concurrently, merges their
//! vehicles into one distance-ranked list and estimates the emissions and
//! travel time of replacing a car trip with a ride.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod providers;
pub mod ranking;
pub mod rounding;
pub mod service;
pub mod telemetry;
pub mod trip;
pub mod web;

// Re-export core types for public API
pub use aggregator::{AggregatedVehicles, Aggregator};
pub use config::EcoRideConfig;
pub use error::{EcoRideError, ProviderError};
pub use models::{Coordinate, TripMetrics, TripSavings, Vehicle, VehicleKind};
pub use providers::{ProviderAdapter, SharedProvider};
pub use service::{MobilityService, TripOutcome};
pub use trip::TripCalculator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, EcoRideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
