//! Application constants for the climate API
//!
//! Route paths, declared schema names, and configuration defaults used
//! throughout the service.

// =============================================================================
// HTTP Routes
// =============================================================================

/// Versioned API prefix shared by every data route
pub const API_PREFIX: &str = "/api/v1.0";

/// Precipitation readings for the whole dataset
pub const ROUTE_PRECIPITATION: &str = "/api/v1.0/precipitation";

/// Station listing
pub const ROUTE_STATIONS: &str = "/api/v1.0/stations";

/// Trailing-year temperature observations for the most active station
pub const ROUTE_TOBS: &str = "/api/v1.0/tobs";

/// Daily temperature statistics from a start date onwards
pub const ROUTE_STATS_FROM: &str = "/api/v1.0/{start}";

/// Daily temperature statistics over an inclusive date range
pub const ROUTE_STATS_RANGE: &str = "/api/v1.0/{start}/{end}";

/// Paths advertised by the index route, in display order
pub const ADVERTISED_ROUTES: &[&str] = &[
    ROUTE_PRECIPITATION,
    ROUTE_STATIONS,
    ROUTE_TOBS,
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

// =============================================================================
// Declared Schema
// =============================================================================

/// Measurement table and its columns
pub mod measurement {
    pub const TABLE: &str = "measurement";
    pub const STATION: &str = "station";
    pub const DATE: &str = "date";
    pub const PRECIPITATION: &str = "prcp";
    pub const TOBS: &str = "tobs";

    /// Columns that must be present for the service to start
    pub const COLUMNS: &[&str] = &[STATION, DATE, PRECIPITATION, TOBS];
}

/// Station table and its columns
pub mod station {
    pub const TABLE: &str = "station";
    pub const STATION: &str = "station";
    pub const NAME: &str = "name";

    /// Columns that must be present for the service to start
    pub const COLUMNS: &[&str] = &[STATION, NAME];
}

// =============================================================================
// Dates
// =============================================================================

/// ISO-8601 calendar date format used by the stored `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window used for recent temperature observations
pub const TRAILING_WINDOW_DAYS: i64 = 365;

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Default SQLite dataset location, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "Resources/hawaii.sqlite";

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default time to wait for a pooled connection
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Directory name under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "climate-api";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the dataset path
pub const ENV_DATABASE: &str = "CLIMATE_API_DATABASE";

/// Environment variable overriding the bind address
pub const ENV_HOST: &str = "CLIMATE_API_HOST";

/// Environment variable overriding the listening port
pub const ENV_PORT: &str = "CLIMATE_API_PORT";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_share_prefix() {
        for route in [
            ROUTE_PRECIPITATION,
            ROUTE_STATIONS,
            ROUTE_TOBS,
            ROUTE_STATS_FROM,
            ROUTE_STATS_RANGE,
        ] {
            assert!(route.starts_with(API_PREFIX), "{} lacks prefix", route);
        }
        assert!(ADVERTISED_ROUTES.iter().all(|r| r.starts_with(API_PREFIX)));
    }

    #[test]
    fn test_declared_columns() {
        assert_eq!(measurement::COLUMNS.len(), 4);
        assert!(measurement::COLUMNS.contains(&"tobs"));
        assert_eq!(station::COLUMNS, &["station", "name"]);
    }
}
