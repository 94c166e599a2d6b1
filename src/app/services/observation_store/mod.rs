//! Observation store: the data-store seam of the service
//!
//! The query service never talks to SQL directly. It asks an
//! [`ObservationStore`] for filtered, sorted and aggregated scans over the
//! `measurement` and `station` tables, and derives everything else itself.
//! [`SqliteStore`] is the production implementation backed by a read-only
//! connection pool.

use crate::Result;
use crate::app::models::{
    DailyTemperatureSummary, DateRange, PrecipitationReading, Station, StationActivity,
    TemperatureObservation,
};
use std::future::Future;

pub mod schema;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use schema::SchemaReport;
pub use sqlite::SqliteStore;

/// Read-only scans over the measurement and station tables
///
/// Every method leases store resources only for the duration of the returned
/// future; implementations must release them on every exit path.
pub trait ObservationStore: Send + Sync + 'static {
    /// All (date, precipitation) rows, ascending by date
    fn precipitation_by_date(
        &self,
    ) -> impl Future<Output = Result<Vec<PrecipitationReading>>> + Send;

    /// All stations in store order
    fn stations(&self) -> impl Future<Output = Result<Vec<Station>>> + Send;

    /// Greatest stored measurement date, `None` for an empty table
    fn latest_measurement_date(&self) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Earliest stored measurement date, `None` for an empty table
    fn earliest_measurement_date(&self) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Measurement row count per station, most active first
    fn station_activity(&self) -> impl Future<Output = Result<Vec<StationActivity>>> + Send;

    /// Temperature observations of one station on or after `since`
    fn temperature_observations(
        &self,
        station_id: &str,
        since: &str,
    ) -> impl Future<Output = Result<Vec<TemperatureObservation>>> + Send;

    /// Per-date min/avg/max temperature within `range`, ascending by date
    fn daily_temperature_summaries(
        &self,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<DailyTemperatureSummary>>> + Send;

    /// Total number of measurement rows
    fn measurement_count(&self) -> impl Future<Output = Result<i64>> + Send;
}
