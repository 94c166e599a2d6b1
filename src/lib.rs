//! Climate API Library
//!
//! A read-only JSON API over a fixed weather-station dataset: station
//! metadata plus daily precipitation and temperature observations held in a
//! single SQLite file.
//!
//! This library provides tools for:
//! - Opening the dataset through a pooled, read-only store adapter
//! - Verifying the declared `measurement`/`station` schema at startup
//! - Deriving temperature statistics per date and over a trailing year
//! - Detecting the most active station
//! - Serving the results as JSON over HTTP

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod http;
    pub mod models;
    pub mod services {
        pub mod observation_store;
        pub mod query_service;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DailyTemperatureSummary, DateRange, Measurement, Station};
pub use app::services::observation_store::{ObservationStore, SqliteStore};
pub use app::services::query_service::QueryService;
pub use config::Config;

/// Result type alias for the climate API
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for climate API operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The data store could not be opened or a query against it failed
    #[error("Data store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    /// A caller-supplied argument was malformed
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The store does not carry the declared tables or columns
    #[error("Schema mismatch in table '{table}': {message}")]
    Schema { table: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A report or response could not be encoded
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a store unavailable error with context
    pub fn store_unavailable(message: impl Into<String>, source: sqlx::Error) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a schema mismatch error
    pub fn schema(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Whether the error was caused by the caller rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

// Automatic conversions from common error types
impl From<sqlx::Error> for Error {
    fn from(error: sqlx::Error) -> Self {
        Self::StoreUnavailable {
            message: "query failed".to_string(),
            source: error,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON encoding failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("invalid configuration file: {}", error),
        }
    }
}
