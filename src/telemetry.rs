//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level. Logs go to stderr
//! so command output on stdout stays machine-readable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::EcoRideError;

/// Level directive used when `RUST_LOG` is unset
#[must_use]
pub fn default_directive(logging: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        logging.level.clone()
    }
}

pub fn init(logging: &LoggingConfig, verbose: bool) -> Result<(), EcoRideError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(logging, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| EcoRideError::config(format!("Failed to initialize logging: {e}")))
}
