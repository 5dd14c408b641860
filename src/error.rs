//! Error types and handling for the `EcoRide` service

use std::time::Duration;

use thiserror::Error;

/// Failure of a single provider adapter.
///
/// These never cross the aggregator boundary: the aggregator logs them and
/// treats the provider as contributing nothing.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Provider task failed: {0}")]
    Task(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Network(format!("request timed out: {err}"))
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else if err.is_builder() {
            ProviderError::Client(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// Main error type for the `EcoRide` application
#[derive(Error, Debug)]
pub enum EcoRideError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Provider construction errors
    #[error("Provider error: {source}")]
    Provider {
        #[from]
        source: ProviderError,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// HTTP server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl EcoRideError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new server error
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            EcoRideError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            EcoRideError::Validation { message } => format!("Invalid input: {message}"),
            EcoRideError::Provider { .. } => {
                "Unable to set up a mobility provider. Please check the provider settings."
                    .to_string()
            }
            EcoRideError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            EcoRideError::Server { .. } => {
                "The web server failed. Please check the port and address.".to_string()
            }
        }
    }
}
