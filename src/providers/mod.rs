//! Mobility providers
//!
//! Each data source implements [`ProviderAdapter`] and maps its own wire
//! format onto [`Vehicle`]. Adapters are built once at startup from
//! [`ProvidersConfig`] and handed to the aggregator as an explicit list:
//! - GBFS systems (MEVO and any configured feed)
//! - Nextbike live map
//! - Hive scooters
//! - Credential-gated operators that are listed but never contribute

pub mod gated;
pub mod gbfs;
pub mod hive;
pub mod nextbike;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ProvidersConfig;
use crate::error::ProviderError;
use crate::models::{Coordinate, Vehicle};

pub use gated::CredentialGatedProvider;
pub use gbfs::GbfsProvider;
pub use hive::HiveProvider;
pub use nextbike::NextbikeProvider;

/// Fetch bound used when an adapter does not override [`ProviderAdapter::timeout`]
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// A source of vehicles near a point.
///
/// Implementations return only vehicles within `radius_km` of `origin`, with
/// `distance_km` filled in. Failures stay local to the adapter; the aggregator
/// logs them and moves on.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable provider name, also used as `Vehicle::provider`
    fn name(&self) -> &str;

    /// Longest a single fetch may take before it counts as failed
    fn timeout(&self) -> Duration {
        DEFAULT_PROVIDER_TIMEOUT
    }

    async fn fetch_vehicles(
        &self,
        origin: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<Vehicle>, ProviderError>;
}

pub type SharedProvider = Arc<dyn ProviderAdapter>;

/// Settings every HTTP-backed adapter is built with
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl From<&ProvidersConfig> for HttpSettings {
    fn from(config: &ProvidersConfig) -> Self {
        Self {
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl HttpSettings {
    pub(crate) fn build_client(&self) -> Result<Client, ProviderError> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| ProviderError::Client(format!("Failed to create HTTP client: {e}")))
    }
}

/// Send a GET request and decode a JSON body, mapping failures onto [`ProviderError`]
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
) -> Result<T, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Network(format!("Request to {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes().await.map_err(ProviderError::from)?;
    serde_json::from_slice(&body)
        .map_err(|e| ProviderError::Parse(format!("Failed to parse response from {url}: {e}")))
}

/// Build the adapter list in query order
pub fn registry_from_config(config: &ProvidersConfig) -> Result<Vec<SharedProvider>, ProviderError> {
    let settings = HttpSettings::from(config);
    let mut providers: Vec<SharedProvider> = Vec::new();

    if config.mevo.enabled {
        providers.push(Arc::new(GbfsProvider::mevo(
            &config.mevo.url,
            &config.client_identifier,
            &settings,
        )?));
    }

    if config.nextbike.enabled {
        providers.push(Arc::new(NextbikeProvider::new(&config.nextbike.url, &settings)?));
    }

    for name in &config.credential_gated {
        providers.push(Arc::new(CredentialGatedProvider::new(name.clone())));
    }

    if config.hive.enabled {
        providers.push(Arc::new(HiveProvider::new(&config.hive.url, &settings)?));
    }

    for feed in &config.gbfs_feeds {
        debug!("Registering GBFS feed {} at {}", feed.name, feed.base_url);
        providers.push(Arc::new(GbfsProvider::new(
            feed.name.clone(),
            &feed.base_url,
            &settings,
        )?));
    }

    info!(
        "Registered {} providers: {}",
        providers.len(),
        providers
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(providers)
}
