//! Concurrent fan-out over all providers
//!
//! Every query spawns one task per provider and waits for all of them. A
//! provider that fails, times out or panics contributes nothing; its error is
//! logged and the remaining results are still returned.

use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::ProviderError;
use crate::models::{Coordinate, Vehicle};
use crate::providers::SharedProvider;
use crate::ranking;

/// Ranked vehicles from every provider that answered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedVehicles {
    pub vehicles: Vec<Vehicle>,
    /// Every registered provider, whether or not it answered
    pub providers_queried: Vec<String>,
}

/// What one provider produced for one query
#[derive(Debug)]
struct ProviderQueryOutcome {
    provider: String,
    result: Result<Vec<Vehicle>, ProviderError>,
}

pub struct Aggregator {
    providers: Vec<SharedProvider>,
}

impl Aggregator {
    #[must_use]
    pub fn new(providers: Vec<SharedProvider>) -> Self {
        Self { providers }
    }

    /// Names of all providers in registration order
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Query every provider concurrently and merge what comes back
    #[instrument(skip(self), fields(providers = self.providers.len()))]
    pub async fn aggregate(&self, origin: Coordinate, radius_km: f64) -> AggregatedVehicles {
        let started = Instant::now();

        let handles = self.providers.iter().map(|provider| {
            let provider = SharedProvider::clone(provider);
            tokio::spawn(async move { query_provider(&provider, origin, radius_km).await })
        });
        let joined = join_all(handles).await;

        let outcomes = joined
            .into_iter()
            .zip(self.provider_names())
            .map(|(joined, provider)| match joined {
                Ok(outcome) => outcome,
                Err(e) => ProviderQueryOutcome {
                    provider,
                    result: Err(ProviderError::Task(e.to_string())),
                },
            });

        let mut vehicles = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(found) => {
                    debug!("{} returned {} vehicles", outcome.provider, found.len());
                    vehicles.extend(found);
                }
                Err(e) => warn!("Error fetching from {}: {}", outcome.provider, e),
            }
        }

        let before = vehicles.len();
        vehicles.retain(|vehicle| vehicle.distance_km <= radius_km);
        if vehicles.len() < before {
            debug!(
                "Dropped {} vehicles reported outside the {}km radius",
                before - vehicles.len(),
                radius_km
            );
        }

        let vehicles = ranking::rank(vehicles);

        info!(
            "Aggregated {} vehicles within {}km of ({}) in {:.3}s",
            vehicles.len(),
            radius_km,
            origin.format_coordinates(),
            started.elapsed().as_secs_f64()
        );

        AggregatedVehicles {
            vehicles,
            providers_queried: self.provider_names(),
        }
    }
}

async fn query_provider(
    provider: &SharedProvider,
    origin: Coordinate,
    radius_km: f64,
) -> ProviderQueryOutcome {
    let timeout = provider.timeout();
    let result = match tokio::time::timeout(timeout, provider.fetch_vehicles(origin, radius_km)).await
    {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(timeout)),
    };

    ProviderQueryOutcome {
        provider: provider.name().to_string(),
        result,
    }
}
