//! Operators whose APIs need credentials we do not hold (VOI, Lime, Tier)

use async_trait::async_trait;
use tracing::debug;

use super::ProviderAdapter;
use crate::error::ProviderError;
use crate::models::{Coordinate, Vehicle};

/// Listed as queried, never contributes vehicles
pub struct CredentialGatedProvider {
    name: String,
}

impl CredentialGatedProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ProviderAdapter for CredentialGatedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_vehicles(
        &self,
        _origin: Coordinate,
        _radius_km: f64,
    ) -> Result<Vec<Vehicle>, ProviderError> {
        debug!("{} requires credentials, returning no vehicles", self.name);
        Ok(Vec::new())
    }
}
