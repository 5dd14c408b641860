//! Nextbike live map feed

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{HttpSettings, ProviderAdapter, get_json};
use crate::error::ProviderError;
use crate::geo;
use crate::models::{Coordinate, Vehicle};
use crate::rounding::truncate_to;

pub const NEXTBIKE_NAME: &str = "Nextbike";

pub struct NextbikeProvider {
    url: String,
    client: Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct NextbikeResponse {
    #[serde(default)]
    countries: Vec<NextbikeCountry>,
}

#[derive(Debug, Deserialize)]
struct NextbikeCountry {
    #[serde(default)]
    cities: Vec<NextbikeCity>,
}

#[derive(Debug, Deserialize)]
struct NextbikeCity {
    #[serde(default)]
    bikes: Vec<NextbikeBike>,
}

#[derive(Debug, Deserialize)]
struct NextbikeBike {
    uid: u64,
    lat: f64,
    lng: f64,
    #[serde(default)]
    bike_name: Option<String>,
}

impl NextbikeProvider {
    pub fn new(url: &str, settings: &HttpSettings) -> Result<Self, ProviderError> {
        Ok(Self {
            url: url.to_string(),
            client: settings.build_client()?,
            timeout: settings.timeout,
        })
    }
}

#[async_trait]
impl ProviderAdapter for NextbikeProvider {
    fn name(&self) -> &str {
        NEXTBIKE_NAME
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    #[instrument(skip(self), fields(provider = NEXTBIKE_NAME))]
    async fn fetch_vehicles(
        &self,
        origin: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<Vehicle>, ProviderError> {
        let response: NextbikeResponse = get_json(self.client.get(&self.url), &self.url).await?;
        let vehicles = bikes_in_range(origin, radius_km, response);
        debug!("{} bikes in range", vehicles.len());
        Ok(vehicles)
    }
}

fn bikes_in_range(origin: Coordinate, radius_km: f64, response: NextbikeResponse) -> Vec<Vehicle> {
    response
        .countries
        .into_iter()
        .flat_map(|country| country.cities)
        .flat_map(|city| city.bikes)
        .filter_map(|bike| {
            let location = Coordinate::new(bike.lat, bike.lng);
            let distance = geo::distance(origin, location);
            if distance > radius_km {
                return None;
            }
            let mut vehicle = Vehicle::bike(
                bike.uid.to_string(),
                NEXTBIKE_NAME,
                location,
                truncate_to(distance, 2),
            );
            vehicle.name = bike.bike_name.filter(|name| !name.is_empty());
            Some(vehicle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_bikes_are_flattened_and_filtered() {
        let payload = r#"{"countries":[
            {"cities":[
                {"uid":362,"name":"Berlin","bikes":[
                    {"uid":1001,"lat":52.5200,"lng":13.4050,"bike_name":"10001"},
                    {"uid":1002,"lat":52.6200,"lng":13.4050,"bike_name":""}
                ]},
                {"uid":1,"name":"Empty"}
            ]},
            {"cities":[{"bikes":[{"uid":1003,"lat":52.5205,"lng":13.4055}]}]}
        ]}"#;
        let response: NextbikeResponse = serde_json::from_str(payload).unwrap();

        let vehicles = bikes_in_range(Coordinate::new(52.5200, 13.4050), 1.0, response);

        let ids: Vec<&str> = vehicles.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["1001", "1003"]);
        assert_eq!(vehicles[0].name.as_deref(), Some("10001"));
        assert_eq!(vehicles[0].distance_km, 0.0);
        assert!(vehicles[1].name.is_none());
        assert!(vehicles.iter().all(|v| v.provider == NEXTBIKE_NAME));
    }

    #[test]
    fn test_missing_countries_is_empty() {
        let response: NextbikeResponse = serde_json::from_str("{}").unwrap();
        assert!(bikes_in_range(Coordinate::new(0.0, 0.0), 5.0, response).is_empty());
    }
}
