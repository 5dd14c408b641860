use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use ecoride::{Coordinate, EcoRideConfig, MobilityService, TripOutcome, telemetry, web};

#[derive(Debug, Parser)]
#[command(name = "ecoride", version, about = "Find nearby bikes and scooters and the CO2 they save")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List vehicles near a point
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search radius in km
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Estimate the savings of riding instead of driving
    Trip {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, allow_hyphen_values = true)]
        dest_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        dest_lon: f64,
        #[arg(long)]
        radius: Option<f64>,
    },
    /// List configured providers
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        EcoRideConfig::load_from_path(cli.config.clone()).context("Failed to load configuration")?;
    telemetry::init(&config.logging, cli.verbose)?;
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Err(e) = web::run(&config).await {
                error!("{}", e.user_message());
                return Err(e.into());
            }
        }
        Command::Nearby { lat, lon, radius } => {
            let origin = coordinate(lat, lon)?;
            let radius_km = config.search.nearby_radius(radius)?;
            let service = service(&config)?;
            let nearby = service.find_nearby(origin, radius_km).await;
            print_json(&json!({
                "count": nearby.vehicles.len(),
                "stations": nearby.vehicles,
                "providers_queried": nearby.providers_queried,
            }))?;
        }
        Command::Trip {
            lat,
            lon,
            dest_lat,
            dest_lon,
            radius,
        } => {
            let origin = coordinate(lat, lon)?;
            let destination = coordinate(dest_lat, dest_lon)?;
            let radius_km = config.search.trip_radius(radius)?;
            let service = service(&config)?;
            match service
                .compute_trip_savings(origin, destination, radius_km)
                .await
            {
                TripOutcome::Found(savings) => print_json(&savings)?,
                TripOutcome::NoVehicles { providers_queried } => bail!(
                    "No bikes or scooters available within {} km (queried: {})",
                    radius_km,
                    providers_queried.join(", ")
                ),
            }
        }
        Command::Providers => {
            let service = service(&config)?;
            print_json(&json!({ "providers": service.provider_names() }))?;
        }
    }

    Ok(())
}

fn coordinate(latitude: f64, longitude: f64) -> Result<Coordinate> {
    let coordinate = Coordinate::new(latitude, longitude);
    coordinate.validate()?;
    Ok(coordinate)
}

fn service(config: &EcoRideConfig) -> Result<MobilityService> {
    MobilityService::from_config(&config.providers).context("Failed to set up providers")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{rendered}");
    Ok(())
}
