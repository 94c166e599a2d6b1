//! Query service deriving climate statistics from the observation store
//!
//! This is the transport-independent core of the API. It validates caller
//! input, asks the store for the scans it needs, and derives the trailing
//! window and the most active station itself.

use crate::app::models::{
    DailyTemperatureSummary, DatasetSummary, DateRange, PrecipitationReading,
    RecentTemperatures, Station, format_date, parse_date, trailing_window_start,
};
use crate::app::services::observation_store::ObservationStore;
use crate::constants::measurement;
use crate::{Error, Result};
use tracing::{debug, instrument};

#[cfg(test)]
pub mod tests;

/// Read-only climate queries over an [`ObservationStore`]
#[derive(Debug, Clone)]
pub struct QueryService<S> {
    store: S,
}

impl<S: ObservationStore> QueryService<S> {
    /// Create a query service over a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every (date, precipitation) pair in the dataset, ascending by date
    #[instrument(skip(self), level = "debug")]
    pub async fn all_precipitation(&self) -> Result<Vec<PrecipitationReading>> {
        let readings = self.store.precipitation_by_date().await?;
        debug!("Loaded {} precipitation readings", readings.len());
        Ok(readings)
    }

    /// Every station in store order
    #[instrument(skip(self), level = "debug")]
    pub async fn all_stations(&self) -> Result<Vec<Station>> {
        let stations = self.store.stations().await?;
        debug!("Loaded {} stations", stations.len());
        Ok(stations)
    }

    /// Trailing-year temperature observations of the most active station
    ///
    /// The window covers the 365 days ending at the latest date recorded
    /// anywhere in the dataset, bounds inclusive. Returns `None` when the
    /// dataset holds no measurements.
    #[instrument(skip(self), level = "debug")]
    pub async fn recent_temperature_observations(&self) -> Result<Option<RecentTemperatures>> {
        let Some(last_date) = self.store.latest_measurement_date().await? else {
            debug!("No measurements recorded, trailing window is empty");
            return Ok(None);
        };

        let last = parse_date(&last_date).map_err(|_| {
            Error::schema(
                measurement::TABLE,
                format!("stored date '{}' is not YYYY-MM-DD", last_date),
            )
        })?;
        let first_date = format_date(trailing_window_start(last));

        let activity = self.store.station_activity().await?;
        let Some(most_active) = activity.into_iter().next() else {
            return Ok(None);
        };

        debug!(
            "Most active station {} with {} observations, window {}..={}",
            most_active.station_id, most_active.observations, first_date, last_date
        );

        let observations = self
            .store
            .temperature_observations(&most_active.station_id, &first_date)
            .await?;

        Ok(Some(RecentTemperatures {
            station_id: most_active.station_id,
            first_date,
            last_date,
            observations,
        }))
    }

    /// Daily min/avg/max temperature for every date on or after `start_date`
    ///
    /// Fails with [`crate::Error::InvalidArgument`] if `start_date` is not a
    /// `YYYY-MM-DD` date.
    #[instrument(skip(self), level = "debug")]
    pub async fn temperature_stats_from(
        &self,
        start_date: &str,
    ) -> Result<Vec<DailyTemperatureSummary>> {
        let range = DateRange::parse(start_date, None)?;
        self.temperature_stats(range).await
    }

    /// Daily min/avg/max temperature between two dates, both inclusive
    ///
    /// An end date before the start date yields an empty result.
    #[instrument(skip(self), level = "debug")]
    pub async fn temperature_stats_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DailyTemperatureSummary>> {
        let range = DateRange::parse(start_date, Some(end_date))?;
        self.temperature_stats(range).await
    }

    /// Daily temperature statistics for a parsed range
    pub async fn temperature_stats(&self, range: DateRange) -> Result<Vec<DailyTemperatureSummary>> {
        let summaries = self.store.daily_temperature_summaries(range).await?;
        debug!(
            "{} daily temperature summaries from {}",
            summaries.len(),
            range.start_key()
        );
        Ok(summaries)
    }

    /// Counts, date bounds and most active station of the dataset
    #[instrument(skip(self), level = "debug")]
    pub async fn dataset_summary(&self) -> Result<DatasetSummary> {
        let station_count = self.store.stations().await?.len() as i64;
        let measurement_count = self.store.measurement_count().await?;
        let first_date = self.store.earliest_measurement_date().await?;
        let last_date = self.store.latest_measurement_date().await?;
        let most_active_station = self.store.station_activity().await?.into_iter().next();

        Ok(DatasetSummary {
            station_count,
            measurement_count,
            first_date,
            last_date,
            most_active_station,
        })
    }
}
