//! Hive scooter map

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{HttpSettings, ProviderAdapter, get_json};
use crate::error::ProviderError;
use crate::geo;
use crate::models::{Coordinate, Vehicle};
use crate::rounding::truncate_to;

pub const HIVE_NAME: &str = "Hive";

const KM_PER_DEGREE_LATITUDE: f64 = 111.32;

pub struct HiveProvider {
    url: String,
    client: Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct HiveResponse {
    #[serde(default)]
    data: Vec<HiveScooter>,
}

#[derive(Debug, Deserialize)]
struct HiveScooter {
    id: Value,
    lat: f64,
    lng: f64,
    #[serde(default)]
    battery: Option<f64>,
}

/// Search box around a point, as (lat1, lat2, lon1, lon2)
#[derive(Debug, Clone, Copy, PartialEq)]
struct BoundingBox {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

impl BoundingBox {
    fn around(origin: Coordinate, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE_LATITUDE;
        let lon_scale = origin.latitude.to_radians().cos().max(0.01);
        let lon_delta = (lat_delta / lon_scale).min(180.0);
        Self {
            lat_min: (origin.latitude - lat_delta).max(-90.0),
            lat_max: (origin.latitude + lat_delta).min(90.0),
            lon_min: (origin.longitude - lon_delta).max(-180.0),
            lon_max: (origin.longitude + lon_delta).min(180.0),
        }
    }
}

impl HiveProvider {
    pub fn new(url: &str, settings: &HttpSettings) -> Result<Self, ProviderError> {
        Ok(Self {
            url: url.to_string(),
            client: settings.build_client()?,
            timeout: settings.timeout,
        })
    }

    fn search_url(&self, bbox: BoundingBox) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}lat1={:.6}&lat2={:.6}&lon1={:.6}&lon2={:.6}",
            self.url, bbox.lat_min, bbox.lat_max, bbox.lon_min, bbox.lon_max
        )
    }
}

#[async_trait]
impl ProviderAdapter for HiveProvider {
    fn name(&self) -> &str {
        HIVE_NAME
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    #[instrument(skip(self), fields(provider = HIVE_NAME))]
    async fn fetch_vehicles(
        &self,
        origin: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<Vehicle>, ProviderError> {
        let url = self.search_url(BoundingBox::around(origin, radius_km));
        let response: HiveResponse = get_json(self.client.get(&url), &url).await?;
        let vehicles = scooters_in_range(origin, radius_km, response);
        debug!("{} scooters in range", vehicles.len());
        Ok(vehicles)
    }
}

fn scooters_in_range(origin: Coordinate, radius_km: f64, response: HiveResponse) -> Vec<Vehicle> {
    response
        .data
        .into_iter()
        .filter_map(|scooter| {
            let location = Coordinate::new(scooter.lat, scooter.lng);
            let distance = geo::distance(origin, location);
            if distance > radius_km {
                return None;
            }
            Some(Vehicle::scooter(
                id_to_string(scooter.id),
                HIVE_NAME,
                location,
                truncate_to(distance, 2),
                scooter.battery.map(battery_percent),
            ))
        })
        .collect()
}

fn id_to_string(id: Value) -> String {
    match id {
        Value::String(id) => id,
        other => other.to_string(),
    }
}

fn battery_percent(level: f64) -> u8 {
    level.clamp(0.0, 100.0) as u8
}
