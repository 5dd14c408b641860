//! Adapters against fixture payloads served from a local axum server

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use ecoride::providers::{GbfsProvider, HiveProvider, HttpSettings, NextbikeProvider};
use ecoride::{Coordinate, ProviderAdapter, ProviderError, VehicleKind};

const GDANSK: Coordinate = Coordinate::new(54.3520, 18.6466);

fn settings() -> HttpSettings {
    HttpSettings {
        timeout: Duration::from_secs(2),
        user_agent: "ecoride-tests".to_string(),
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn station_information(headers: HeaderMap) -> impl IntoResponse {
    if headers.get("Client-Identifier").is_none() {
        return (StatusCode::FORBIDDEN, Json(json!({"error": "identify yourself"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "last_updated": 1_700_000_000,
            "ttl": 10,
            "data": {"stations": [
                {"station_id": "1", "name": "Brama Wyżynna", "lat": 54.3525, "lon": 18.6470},
                {"station_id": "2", "name": "Empty dock", "lat": 54.3521, "lon": 18.6467},
                {"station_id": "3", "name": "Oliwa", "lat": 54.4100, "lon": 18.5700}
            ]}
        })),
    )
}

async fn station_status() -> Json<serde_json::Value> {
    Json(json!({
        "last_updated": 1_700_000_000,
        "ttl": 10,
        "data": {"stations": [
            {"station_id": "1", "num_bikes_available": 5, "num_docks_available": 7, "is_renting": true},
            {"station_id": "2", "num_bikes_available": 0, "num_docks_available": 12, "is_renting": 1},
            {"station_id": "3", "num_bikes_available": 2, "num_docks_available": 3, "is_renting": 1}
        ]}
    }))
}

fn gbfs_router() -> Router {
    Router::new()
        .route("/gbfs/station_information.json", get(station_information))
        .route("/gbfs/station_status.json", get(station_status))
}

#[tokio::test]
async fn gbfs_stations_are_joined_and_filtered() {
    let base = serve(gbfs_router()).await;
    let provider =
        GbfsProvider::mevo(&format!("{base}/gbfs/"), "ecoride-tests", &settings()).unwrap();

    let vehicles = provider.fetch_vehicles(GDANSK, 2.0).await.unwrap();

    assert_eq!(provider.name(), "MEVO");
    assert_eq!(vehicles.len(), 1);
    let station = &vehicles[0];
    assert_eq!(station.id, "1");
    assert_eq!(station.provider, "MEVO");
    assert_eq!(station.kind, VehicleKind::Bike);
    assert_eq!(station.name.as_deref(), Some("Brama Wyżynna"));
    assert_eq!(station.bikes_available, Some(5));
    assert_eq!(station.docks_available, Some(7));
    assert!(station.distance_km < 0.1);
    assert!(station.is_available);
}

#[tokio::test]
async fn gbfs_without_client_identifier_gets_status_error() {
    let base = serve(gbfs_router()).await;
    let provider = GbfsProvider::new("Plain", &format!("{base}/gbfs"), &settings()).unwrap();

    let err = provider.fetch_vehicles(GDANSK, 2.0).await.unwrap_err();

    assert!(
        matches!(err, ProviderError::Status { status: 403, .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn nextbike_bikes_are_flattened() {
    let router = Router::new().route(
        "/maps/nextbike-live.json",
        get(|| async {
            Json(json!({"countries": [{"name": "Poland", "cities": [
                {"uid": 362, "name": "Gdańsk", "bikes": [
                    {"uid": 9001, "lat": 54.3530, "lng": 18.6466, "bike_name": "90001"},
                    {"uid": 9002, "lat": 54.6000, "lng": 18.6466, "bike_name": "90002"}
                ]}
            ]}]}))
        }),
    );
    let base = serve(router).await;
    let provider =
        NextbikeProvider::new(&format!("{base}/maps/nextbike-live.json?city=362"), &settings())
            .unwrap();

    let vehicles = provider.fetch_vehicles(GDANSK, 1.0).await.unwrap();

    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].id, "9001");
    assert_eq!(vehicles[0].provider, "Nextbike");
    assert_eq!(vehicles[0].name.as_deref(), Some("90001"));
}

#[tokio::test]
async fn hive_receives_bounding_box() {
    let router = Router::new().route(
        "/cars/",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let has_box = ["lat1", "lat2", "lon1", "lon2"]
                .iter()
                .all(|key| params.contains_key(*key));
            if !has_box {
                return (StatusCode::BAD_REQUEST, Json(json!({"data": []})));
            }
            (
                StatusCode::OK,
                Json(json!({"data": [
                    {"id": 501, "lat": 54.3522, "lng": 18.6466, "battery": 64.0},
                    {"id": "x-2", "lat": 54.3600, "lng": 18.6466}
                ]})),
            )
        }),
    );
    let base = serve(router).await;
    let provider = HiveProvider::new(&format!("{base}/cars/"), &settings()).unwrap();

    let vehicles = provider.fetch_vehicles(GDANSK, 2.0).await.unwrap();

    assert_eq!(vehicles.len(), 2);
    assert_eq!(vehicles[0].id, "501");
    assert_eq!(vehicles[0].kind, VehicleKind::Scooter);
    assert_eq!(vehicles[0].battery_level, Some(64));
    assert_eq!(vehicles[1].id, "x-2");
    assert_eq!(vehicles[1].battery_level, None);
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let router = Router::new().route("/broken.json", get(|| async { "{not json" }));
    let base = serve(router).await;
    let provider = NextbikeProvider::new(&format!("{base}/broken.json"), &settings()).unwrap();

    let err = provider.fetch_vehicles(GDANSK, 1.0).await.unwrap_err();

    assert!(matches!(err, ProviderError::Parse(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let provider = HiveProvider::new(&format!("http://{addr}/cars/"), &settings()).unwrap();

    let err = provider.fetch_vehicles(GDANSK, 1.0).await.unwrap_err();

    assert!(matches!(err, ProviderError::Network(_)), "unexpected error: {err}");
}
