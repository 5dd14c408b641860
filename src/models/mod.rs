//! Data models for the EcoRide service
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates
//! - Vehicle: The normalized bike/scooter representation
//! - Trip: Metrics derived for a single trip

pub mod location;
pub mod trip;
pub mod vehicle;

// Re-export all public types for convenient access
pub use location::Coordinate;
pub use trip::{EnvironmentalImpact, TravelTimes, TripMetrics, TripSavings};
pub use vehicle::{Vehicle, VehicleKind};
