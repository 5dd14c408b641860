//! Deterministic provider doubles for unit tests.

use std::time::Duration;

use async_trait::async_trait;

use super::ProviderAdapter;
use crate::error::ProviderError;
use crate::models::{Coordinate, Vehicle};

#[derive(Debug, Clone)]
pub(crate) enum StubBehaviour {
    Vehicles(Vec<Vehicle>),
    Fail,
    Delay(Duration, Vec<Vehicle>),
    Hang,
    Panic,
}

/// Provider returning a canned outcome
#[derive(Debug, Clone)]
pub(crate) struct StubProvider {
    name: String,
    timeout: Duration,
    behaviour: StubBehaviour,
}

impl StubProvider {
    pub(crate) fn new(name: &str, behaviour: StubBehaviour) -> Self {
        Self {
            name: name.to_string(),
            timeout: Duration::from_secs(2),
            behaviour,
        }
    }

    pub(crate) fn returning(name: &str, vehicles: Vec<Vehicle>) -> Self {
        Self::new(name, StubBehaviour::Vehicles(vehicles))
    }

    pub(crate) fn failing(name: &str) -> Self {
        Self::new(name, StubBehaviour::Fail)
    }

    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProviderAdapter for StubProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_vehicles(
        &self,
        _origin: Coordinate,
        _radius_km: f64,
    ) -> Result<Vec<Vehicle>, ProviderError> {
        match &self.behaviour {
            StubBehaviour::Vehicles(vehicles) => Ok(vehicles.clone()),
            StubBehaviour::Fail => Err(ProviderError::Network("connection refused".to_string())),
            StubBehaviour::Delay(delay, vehicles) => {
                tokio::time::sleep(*delay).await;
                Ok(vehicles.clone())
            }
            StubBehaviour::Hang => {
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }
            StubBehaviour::Panic => panic!("stub provider {} panicked", self.name),
        }
    }
}

/// A bike at a given distance, positioned on the equator east of (0, 0)
pub(crate) fn bike_at(provider: &str, id: &str, distance_km: f64) -> Vehicle {
    let longitude = distance_km / crate::geo::distance(
        Coordinate::new(0.0, 0.0),
        Coordinate::new(0.0, 1.0),
    );
    Vehicle::bike(id, provider, Coordinate::new(0.0, longitude), distance_km)
}
