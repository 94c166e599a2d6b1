//! Shared test utilities for query service tests

use crate::app::models::{
    DailyTemperatureSummary, DateRange, PrecipitationReading, Station, StationActivity,
    TemperatureObservation,
};
use crate::app::services::observation_store::ObservationStore;
use crate::{Error, Result};

pub mod query_tests;

/// Store whose every scan fails as if the dataset file had gone away
#[derive(Debug, Clone, Default)]
pub struct UnavailableStore;

fn offline<T>() -> Result<T> {
    Err(Error::store_unavailable(
        "dataset offline",
        sqlx::Error::PoolClosed,
    ))
}

impl ObservationStore for UnavailableStore {
    async fn precipitation_by_date(&self) -> Result<Vec<PrecipitationReading>> {
        offline()
    }

    async fn stations(&self) -> Result<Vec<Station>> {
        offline()
    }

    async fn latest_measurement_date(&self) -> Result<Option<String>> {
        offline()
    }

    async fn earliest_measurement_date(&self) -> Result<Option<String>> {
        offline()
    }

    async fn station_activity(&self) -> Result<Vec<StationActivity>> {
        offline()
    }

    async fn temperature_observations(
        &self,
        _station_id: &str,
        _since: &str,
    ) -> Result<Vec<TemperatureObservation>> {
        offline()
    }

    async fn daily_temperature_summaries(
        &self,
        _range: DateRange,
    ) -> Result<Vec<DailyTemperatureSummary>> {
        offline()
    }

    async fn measurement_count(&self) -> Result<i64> {
        offline()
    }
}
