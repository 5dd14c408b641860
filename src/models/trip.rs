//! Trip-level metrics derived from an origin, a destination and a vehicle

use serde::{Deserialize, Serialize};

use super::Vehicle;

/// Estimated travel times as human-readable durations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimes {
    pub bike_minutes: String,
    pub car_minutes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    /// Grams of CO2 a car emits per km
    pub co2_per_km_car_grams: u32,
    pub co2_saved_grams: i64,
    /// Trees needed to absorb the saved CO2 in a day
    pub equivalent_trees: f64,
}

/// Everything derived for one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripMetrics {
    pub distance_km: f64,
    pub co2_savings_kg: f64,
    pub travel_times: TravelTimes,
    pub environmental_impact: EnvironmentalImpact,
}

/// A trip result with the vehicle it was computed for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSavings {
    pub closest_vehicle: Vehicle,
    #[serde(flatten)]
    pub metrics: TripMetrics,
    pub message: String,
    pub providers_queried: Vec<String>,
}
