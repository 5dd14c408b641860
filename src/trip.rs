//! CO2 savings and travel-time estimates for a trip
//!
//! Every figure is derived from the unrounded distance. Only the reported
//! values are truncated toward zero, see [`crate::rounding`].

use crate::geo;
use crate::models::{Coordinate, EnvironmentalImpact, TravelTimes, TripMetrics, Vehicle};
use crate::rounding::truncate_to;

/// kg of CO2 emitted per km by an average car
pub const CO2_PER_KM_CAR_KG: f64 = 0.12;
pub const CO2_PER_KM_CAR_GRAMS: u32 = 120;
/// kg of CO2 one tree absorbs per day
pub const CO2_PER_TREE_KG: f64 = 0.021;
pub const BIKE_SPEED_KPH: f64 = 15.0;
pub const CAR_SPEED_KPH: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct TripCalculator;

/// Unrounded trip figures every reported value is derived from
#[derive(Debug, Clone, Copy)]
struct TripMeasure {
    distance_km: f64,
    co2_savings_kg: f64,
}

impl TripMeasure {
    fn between(origin: Coordinate, destination: Coordinate) -> Self {
        let distance_km = geo::distance(origin, destination);
        Self {
            distance_km,
            co2_savings_kg: distance_km * CO2_PER_KM_CAR_KG,
        }
    }
}

impl TripCalculator {
    /// Metrics for riding from `origin` to `destination` instead of driving
    #[must_use]
    pub fn calculate(&self, origin: Coordinate, destination: Coordinate) -> TripMetrics {
        let trip = TripMeasure::between(origin, destination);

        TripMetrics {
            distance_km: truncate_to(trip.distance_km, 2),
            co2_savings_kg: truncate_to(trip.co2_savings_kg, 3),
            travel_times: TravelTimes {
                bike_minutes: format_duration(trip.distance_km / BIKE_SPEED_KPH),
                car_minutes: format_duration(trip.distance_km / CAR_SPEED_KPH),
            },
            environmental_impact: EnvironmentalImpact {
                co2_per_km_car_grams: CO2_PER_KM_CAR_GRAMS,
                co2_saved_grams: (trip.co2_savings_kg * 1000.0).trunc() as i64,
                equivalent_trees: truncate_to(trip.co2_savings_kg / CO2_PER_TREE_KG, 2),
            },
        }
    }

    /// Sentence shown alongside the figures
    #[must_use]
    pub fn summary_message(
        &self,
        vehicle: &Vehicle,
        origin: Coordinate,
        destination: Coordinate,
    ) -> String {
        let trip = TripMeasure::between(origin, destination);
        format!(
            "By choosing a {} instead of a car for this {:.2}km trip, you save approximately {:.2}kg of CO2 emissions!",
            vehicle.kind, trip.distance_km, trip.co2_savings_kg
        )
    }
}

/// Human-readable duration from fractional hours, counting whole minutes
#[must_use]
pub fn format_duration(hours: f64) -> String {
    let minutes = (hours * 60.0).floor().max(0.0) as u64;
    if minutes < 60 {
        return format!("{minutes} minutes");
    }

    let whole_hours = minutes / 60;
    let remainder = minutes % 60;
    match (whole_hours, remainder) {
        (1, 0) => "1 hour".to_string(),
        (h, 0) => format!("{h} hours"),
        (1, r) => format!("1 hour {r} minutes"),
        (h, r) => format!("{h} hours {r} minutes"),
    }
}
