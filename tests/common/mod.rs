#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use ecoride::api::AppState;
use ecoride::config::{SearchConfig, ServerConfig};
use ecoride::{Coordinate, MobilityService, ProviderAdapter, ProviderError, SharedProvider, Vehicle};
use http_body_util::BodyExt;
use serde_json::Value;

/// Provider answering every query with the same vehicles, or an error
pub struct FixedProvider {
    name: String,
    vehicles: Option<Vec<Vehicle>>,
}

impl FixedProvider {
    pub fn returning(name: &str, vehicles: Vec<Vehicle>) -> SharedProvider {
        Arc::new(Self {
            name: name.to_string(),
            vehicles: Some(vehicles),
        })
    }

    pub fn failing(name: &str) -> SharedProvider {
        Arc::new(Self {
            name: name.to_string(),
            vehicles: None,
        })
    }
}

#[async_trait]
impl ProviderAdapter for FixedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_vehicles(
        &self,
        _origin: Coordinate,
        _radius_km: f64,
    ) -> Result<Vec<Vehicle>, ProviderError> {
        self.vehicles
            .clone()
            .ok_or_else(|| ProviderError::Network("unreachable".to_string()))
    }
}

pub fn app(providers: Vec<SharedProvider>) -> Router {
    let service = Arc::new(MobilityService::new(providers));
    let state = AppState::new(service, SearchConfig::default());
    ecoride::web::app(state, &ServerConfig::default())
}

pub fn bike(provider: &str, id: &str, distance_km: f64) -> Vehicle {
    Vehicle::bike(id, provider, Coordinate::new(0.0, 0.0), distance_km)
}

pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
