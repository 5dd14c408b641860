//! GBFS station feeds (MEVO and other docked bike systems)

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{HttpSettings, ProviderAdapter, get_json};
use crate::error::ProviderError;
use crate::geo;
use crate::models::{Coordinate, Vehicle};
use crate::rounding::truncate_to;

pub const MEVO_NAME: &str = "MEVO";

/// Docked bike-share system publishing a GBFS feed
pub struct GbfsProvider {
    name: String,
    base_url: String,
    client_identifier: Option<String>,
    client: Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GbfsEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct StationInformationData {
    stations: Vec<StationInformation>,
}

#[derive(Debug, Deserialize)]
struct StationInformation {
    station_id: String,
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct StationStatusData {
    stations: Vec<StationStatus>,
}

#[derive(Debug, Deserialize)]
struct StationStatus {
    station_id: String,
    num_bikes_available: u32,
    #[serde(default)]
    num_docks_available: u32,
    #[serde(default)]
    is_renting: Option<GbfsFlag>,
}

/// GBFS v1 publishes flags as 0/1, v2+ as booleans
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(untagged)]
enum GbfsFlag {
    Bool(bool),
    Int(u8),
}

impl GbfsFlag {
    fn is_set(self) -> bool {
        match self {
            GbfsFlag::Bool(flag) => flag,
            GbfsFlag::Int(flag) => flag != 0,
        }
    }
}

impl GbfsProvider {
    pub fn new(
        name: impl Into<String>,
        base_url: &str,
        settings: &HttpSettings,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_identifier: None,
            client: settings.build_client()?,
            timeout: settings.timeout,
        })
    }

    /// MEVO asks callers to identify themselves on every request
    pub fn mevo(
        base_url: &str,
        client_identifier: &str,
        settings: &HttpSettings,
    ) -> Result<Self, ProviderError> {
        Ok(Self::new(MEVO_NAME, base_url, settings)?.with_client_identifier(client_identifier))
    }

    #[must_use]
    pub fn with_client_identifier(mut self, client_identifier: impl Into<String>) -> Self {
        self.client_identifier = Some(client_identifier.into());
        self
    }

    fn feed_url(&self, feed: &str) -> String {
        format!("{}/{feed}.json", self.base_url)
    }

    async fn fetch_feed<T: DeserializeOwned>(&self, feed: &str) -> Result<T, ProviderError> {
        let url = self.feed_url(feed);
        let mut request = self.client.get(&url);
        if let Some(identifier) = &self.client_identifier {
            request = request.header("Client-Identifier", identifier);
        }
        let envelope: GbfsEnvelope<T> = get_json(request, &url).await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ProviderAdapter for GbfsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    #[instrument(skip(self), fields(provider = %self.name))]
    async fn fetch_vehicles(
        &self,
        origin: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<Vehicle>, ProviderError> {
        let (information, status) = tokio::try_join!(
            self.fetch_feed::<StationInformationData>("station_information"),
            self.fetch_feed::<StationStatusData>("station_status"),
        )?;

        let vehicles = stations_to_vehicles(
            &self.name,
            origin,
            radius_km,
            information.stations,
            &status.stations,
        );
        debug!("{} stations with bikes in range", vehicles.len());
        Ok(vehicles)
    }
}

/// Join station information with status, keeping stations in range that have bikes
fn stations_to_vehicles(
    provider: &str,
    origin: Coordinate,
    radius_km: f64,
    stations: Vec<StationInformation>,
    statuses: &[StationStatus],
) -> Vec<Vehicle> {
    let status_by_id: HashMap<&str, &StationStatus> = statuses
        .iter()
        .map(|status| (status.station_id.as_str(), status))
        .collect();

    stations
        .into_iter()
        .filter_map(|station| {
            let status = status_by_id.get(station.station_id.as_str())?;
            if status.num_bikes_available == 0 {
                return None;
            }

            let location = Coordinate::new(station.lat, station.lon);
            let distance = geo::distance(origin, location);
            if distance > radius_km {
                return None;
            }

            let mut vehicle = Vehicle::station(
                station.station_id,
                provider,
                station.name,
                location,
                truncate_to(distance, 2),
                status.num_bikes_available,
                status.num_docks_available,
            );
            vehicle.is_available = status.is_renting.is_none_or(GbfsFlag::is_set);
            Some(vehicle)
        })
        .collect()
}
