//! Configuration management for the `EcoRide` service
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and provides validation for all configuration settings.

use crate::EcoRideError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the `EcoRide` service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EcoRideConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Search radius settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Upstream provider settings
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// File under `static_dir` served at `/`
    #[serde(default = "default_index_file")]
    pub index_file: String,
    /// Upper bound for a whole request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

/// Search radius settings in kilometers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Radius used by trip calculations when the request gives none
    #[serde(default = "default_trip_radius")]
    pub trip_radius_km: f64,
    /// Radius used by nearby-station lookups when the request gives none
    #[serde(default = "default_nearby_radius")]
    pub nearby_radius_km: f64,
    /// Largest radius a request may ask for
    #[serde(default = "default_max_radius")]
    pub max_radius_km: f64,
}

/// An HTTP endpoint that can be switched off
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub url: String,
}

/// An additional GBFS system to query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GbfsFeedConfig {
    pub name: String,
    /// Base URL holding `station_information.json` and `station_status.json`
    pub base_url: String,
}

/// Upstream provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Per-provider fetch timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Sent as `Client-Identifier` to GBFS systems that ask for one
    #[serde(default = "default_client_identifier")]
    pub client_identifier: String,
    #[serde(default = "default_mevo")]
    pub mevo: EndpointConfig,
    #[serde(default = "default_nextbike")]
    pub nextbike: EndpointConfig,
    #[serde(default = "default_hive")]
    pub hive: EndpointConfig,
    #[serde(default)]
    pub gbfs_feeds: Vec<GbfsFeedConfig>,
    /// Providers listed as queried but needing credentials we do not hold
    #[serde(default = "default_credential_gated")]
    pub credential_gated: Vec<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_index_file() -> String {
    "index.html".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_trip_radius() -> f64 {
    2.0
}

fn default_nearby_radius() -> f64 {
    1.0
}

fn default_max_radius() -> f64 {
    50.0
}

fn default_true() -> bool {
    true
}

fn default_provider_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("EcoRide/{}", crate::VERSION)
}

fn default_client_identifier() -> String {
    "ecoride-co2calculator".to_string()
}

fn default_mevo() -> EndpointConfig {
    EndpointConfig {
        enabled: true,
        url: "https://gbfs.urbansharing.com/rowermevo.pl".to_string(),
    }
}

fn default_nextbike() -> EndpointConfig {
    EndpointConfig {
        enabled: true,
        url: "https://api.nextbike.net/maps/nextbike-live.json?city=362".to_string(),
    }
}

fn default_hive() -> EndpointConfig {
    EndpointConfig {
        enabled: true,
        url: "https://hive.frontend.fleetbird.eu/api/prod/v1.06/map/cars/".to_string(),
    }
}

fn default_credential_gated() -> Vec<String> {
    vec!["VOI".to_string(), "Lime".to_string(), "Tier".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            index_file: default_index_file(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trip_radius_km: default_trip_radius(),
            nearby_radius_km: default_nearby_radius(),
            max_radius_km: default_max_radius(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_provider_timeout(),
            user_agent: default_user_agent(),
            client_identifier: default_client_identifier(),
            mevo: default_mevo(),
            nextbike: default_nextbike(),
            hive: default_hive(),
            gbfs_feeds: Vec::new(),
            credential_gated: default_credential_gated(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SearchConfig {
    /// Radius for a trip request, falling back to `trip_radius_km`
    pub fn trip_radius(&self, requested: Option<f64>) -> std::result::Result<f64, EcoRideError> {
        self.resolve_radius(requested, self.trip_radius_km)
    }

    /// Radius for a nearby lookup, falling back to `nearby_radius_km`
    pub fn nearby_radius(
        &self,
        requested: Option<f64>,
    ) -> std::result::Result<f64, EcoRideError> {
        self.resolve_radius(requested, self.nearby_radius_km)
    }

    // Absent or non-positive means "use the default"
    fn resolve_radius(
        &self,
        requested: Option<f64>,
        fallback: f64,
    ) -> std::result::Result<f64, EcoRideError> {
        match requested {
            None => Ok(fallback),
            Some(radius) if !radius.is_finite() => {
                Err(EcoRideError::validation("Radius must be a finite number"))
            }
            Some(radius) if radius <= 0.0 => Ok(fallback),
            Some(radius) if radius > self.max_radius_km => Err(EcoRideError::validation(
                format!("Radius cannot exceed {} km", self.max_radius_km),
            )),
            Some(radius) => Ok(radius),
        }
    }
}

impl ProvidersConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl EcoRideConfig {
    /// Load configuration from `config.toml` and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. ECORIDE_SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("ECORIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: EcoRideConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to empty or zeroed configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.search.trip_radius_km <= 0.0 {
            self.search.trip_radius_km = default_trip_radius();
        }
        if self.search.nearby_radius_km <= 0.0 {
            self.search.nearby_radius_km = default_nearby_radius();
        }
        if self.search.max_radius_km <= 0.0 {
            self.search.max_radius_km = default_max_radius();
        }
        if self.providers.timeout_seconds == 0 {
            self.providers.timeout_seconds = default_provider_timeout();
        }
        if self.providers.user_agent.is_empty() {
            self.providers.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_provider_urls()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.providers.timeout_seconds > 60 {
            return Err(
                EcoRideError::config("Provider timeout cannot exceed 60 seconds").into(),
            );
        }

        if self.server.request_timeout_seconds < self.providers.timeout_seconds {
            return Err(EcoRideError::config(
                "Request timeout must be at least the provider timeout",
            )
            .into());
        }

        if self.search.max_radius_km > 500.0 {
            return Err(EcoRideError::config("Maximum search radius cannot exceed 500 km").into());
        }

        for (label, radius) in [
            ("Trip", self.search.trip_radius_km),
            ("Nearby", self.search.nearby_radius_km),
        ] {
            if !radius.is_finite() || radius > self.search.max_radius_km {
                return Err(EcoRideError::config(format!(
                    "{label} search radius must not exceed the maximum of {} km",
                    self.search.max_radius_km
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(EcoRideError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(EcoRideError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Every configured upstream must be an HTTP(S) URL
    fn validate_provider_urls(&self) -> Result<()> {
        let endpoints = [
            ("mevo", &self.providers.mevo.url),
            ("nextbike", &self.providers.nextbike.url),
            ("hive", &self.providers.hive.url),
        ];
        let feeds = self
            .providers
            .gbfs_feeds
            .iter()
            .map(|feed| (feed.name.as_str(), &feed.base_url));

        for (name, url) in endpoints.into_iter().chain(feeds) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(EcoRideError::config(format!(
                    "Provider '{name}' URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
