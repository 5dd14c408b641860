//! JSON endpoints over [`MobilityService`]
//!
//! Every failure is answered with a JSON body carrying an `error` field, see
//! [`ApiError`].

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::models::{Coordinate, TripSavings, Vehicle};
use crate::service::{MobilityService, TripOutcome};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MobilityService>,
    pub search: SearchConfig,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<MobilityService>, search: SearchConfig) -> Self {
        Self { service, search }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request parameters: {details}")]
    InvalidRequest { details: String },

    #[error("Invalid query parameters: {details}")]
    InvalidQuery { details: String },

    #[error("Invalid coordinates: {details}")]
    InvalidCoordinates { details: String },

    #[error("Invalid radius: {details}")]
    InvalidRadius { details: String },

    #[error("No bikes or scooters available in your area")]
    NoVehicles { providers_queried: Vec<String> },

    #[error("Endpoint not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidRequest { details } => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid request parameters", "details": details}),
            ),
            ApiError::InvalidQuery { details } => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid query parameters", "details": details}),
            ),
            ApiError::InvalidCoordinates { details } => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid coordinates", "details": details}),
            ),
            ApiError::InvalidRadius { details } => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid radius", "details": details}),
            ),
            ApiError::NoVehicles { providers_queried } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "No bikes or scooters available in your area",
                    "message": "Please try again later or expand your search radius",
                    "providers_queried": providers_queried,
                }),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({"error": "Endpoint not found"}),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub destination_latitude: f64,
    pub destination_longitude: f64,
    #[serde(default)]
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub radius: Option<f64>,
}

#[derive(Debug, Serialize)]
struct TripResponse {
    success: bool,
    #[serde(flatten)]
    savings: TripSavings,
}

#[derive(Debug, Serialize)]
struct NearbyResponse {
    success: bool,
    count: usize,
    stations: Vec<Vehicle>,
    providers_queried: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/providers", get(list_providers))
        .route("/v1/calculate-co2-savings", post(calculate_co2_savings))
        .route("/v1/nearby-stations", get(nearby_stations))
        .with_state(state)
}

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "providers": state.service.provider_count(),
    }))
}

async fn list_providers(State(state): State<AppState>) -> Json<serde_json::Value> {
    let providers = state.service.provider_names();
    Json(json!({
        "success": true,
        "count": providers.len(),
        "providers": providers,
    }))
}

async fn calculate_co2_savings(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidRequest {
        details: rejection.body_text(),
    })?;

    let origin = checked_coordinate(request.latitude, request.longitude)?;
    let destination =
        checked_coordinate(request.destination_latitude, request.destination_longitude)?;
    let radius_km = state
        .search
        .trip_radius(request.radius)
        .map_err(|e| ApiError::InvalidRadius {
            details: e.to_string(),
        })?;

    info!(
        "Trip request from ({}) to ({}) within {}km",
        origin.format_coordinates(),
        destination.format_coordinates(),
        radius_km
    );

    match state
        .service
        .compute_trip_savings(origin, destination, radius_km)
        .await
    {
        TripOutcome::Found(savings) => Ok(Json(TripResponse {
            success: true,
            savings: *savings,
        })
        .into_response()),
        TripOutcome::NoVehicles { providers_queried } => {
            Err(ApiError::NoVehicles { providers_queried })
        }
    }
}

async fn nearby_stations(
    State(state): State<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::InvalidQuery {
        details: rejection.body_text(),
    })?;

    let origin = checked_coordinate(query.latitude, query.longitude)?;
    let radius_km = state
        .search
        .nearby_radius(query.radius)
        .map_err(|e| ApiError::InvalidRadius {
            details: e.to_string(),
        })?;

    let nearby = state.service.find_nearby(origin, radius_km).await;
    debug!("Nearby lookup found {} vehicles", nearby.vehicles.len());

    Ok(Json(NearbyResponse {
        success: true,
        count: nearby.vehicles.len(),
        stations: nearby.vehicles,
        providers_queried: nearby.providers_queried,
    })
    .into_response())
}

fn checked_coordinate(latitude: f64, longitude: f64) -> Result<Coordinate, ApiError> {
    let coordinate = Coordinate::new(latitude, longitude);
    coordinate
        .validate()
        .map_err(|e| ApiError::InvalidCoordinates {
            details: e.to_string(),
        })?;
    Ok(coordinate)
}
