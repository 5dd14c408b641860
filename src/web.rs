use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::config::{EcoRideConfig, ServerConfig};
use crate::error::EcoRideError;
use crate::service::MobilityService;

/// The full application: API routes, static assets and the JSON 404 fallback
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = Path::new(&server.static_dir);

    Router::new()
        .merge(api::router(state))
        .nest_service("/static", ServeDir::new(static_dir))
        .route_service("/", ServeFile::new(static_dir.join(&server.index_file)))
        .fallback(api::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_seconds,
                ))),
        )
}

pub async fn run(config: &EcoRideConfig) -> Result<(), EcoRideError> {
    let service = Arc::new(MobilityService::from_config(&config.providers)?);
    let state = AppState::new(service, config.search.clone());
    let app = app(state, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EcoRideError::server(format!("Failed to bind {addr}: {e}")))?;
    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| EcoRideError::server(format!("Server stopped unexpectedly: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
