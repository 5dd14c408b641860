//! The two operations the outside world calls: nearby lookup and trip savings

use tracing::{info, instrument};

use crate::aggregator::{AggregatedVehicles, Aggregator};
use crate::config::ProvidersConfig;
use crate::error::ProviderError;
use crate::models::{Coordinate, TripSavings};
use crate::providers::{SharedProvider, registry_from_config};
use crate::trip::TripCalculator;

/// Result of a trip-savings request
#[derive(Debug, Clone, PartialEq)]
pub enum TripOutcome {
    Found(Box<TripSavings>),
    /// Nothing in range from any provider
    NoVehicles { providers_queried: Vec<String> },
}

pub struct MobilityService {
    aggregator: Aggregator,
    calculator: TripCalculator,
}

impl MobilityService {
    #[must_use]
    pub fn new(providers: Vec<SharedProvider>) -> Self {
        Self {
            aggregator: Aggregator::new(providers),
            calculator: TripCalculator,
        }
    }

    /// Build the service with every provider enabled in `config`
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(registry_from_config(config)?))
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.aggregator.provider_names()
    }

    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.aggregator.provider_count()
    }

    /// Vehicles within `radius_km` of `origin`, nearest first.
    ///
    /// Coordinates and radius are expected to be validated by the caller.
    pub async fn find_nearby(&self, origin: Coordinate, radius_km: f64) -> AggregatedVehicles {
        self.aggregator.aggregate(origin, radius_km).await
    }

    /// Savings from taking the closest vehicle to `destination` instead of a car
    #[instrument(skip(self))]
    pub async fn compute_trip_savings(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        radius_km: f64,
    ) -> TripOutcome {
        let AggregatedVehicles {
            vehicles,
            providers_queried,
        } = self.aggregator.aggregate(origin, radius_km).await;

        let Some(closest_vehicle) = vehicles.into_iter().next() else {
            info!("No vehicles within {}km", radius_km);
            return TripOutcome::NoVehicles { providers_queried };
        };

        let metrics = self.calculator.calculate(origin, destination);
        let message = self
            .calculator
            .summary_message(&closest_vehicle, origin, destination);

        TripOutcome::Found(Box::new(TripSavings {
            closest_vehicle,
            metrics,
            message,
            providers_queried,
        }))
    }
}
