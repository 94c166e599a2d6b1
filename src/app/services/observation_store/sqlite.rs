//! SQLite implementation of the observation store
//!
//! Opens the dataset file read-only behind a `sqlx` connection pool. Each
//! query checks a connection out of the pool and hands it back when the query
//! future completes or is dropped, so a failing request never leaks a lease.

use super::ObservationStore;
use crate::app::models::{
    DailyTemperatureSummary, DateRange, PrecipitationReading, Station, StationActivity,
    TemperatureObservation,
};
use crate::config::DatabaseConfig;
use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Read-only store over a SQLite dataset file
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteStore {
    /// Open the dataset described by the database configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Self::open(
            &config.path,
            config.max_connections,
            Duration::from_secs(config.acquire_timeout_secs),
        )
        .await
    }

    /// Open a dataset file read-only with the given pool limits
    ///
    /// Fails with [`Error::StoreUnavailable`] if the file is missing or is not
    /// a SQLite database. The file is never created.
    pub async fn open(
        path: &Path,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        debug!(
            "Opening dataset {} (max {} connections, {:?} acquire timeout)",
            path.display(),
            max_connections,
            acquire_timeout
        );

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| {
                Error::store_unavailable(format!("cannot open '{}'", path.display()), e)
            })?;

        info!("Opened dataset {}", path.display());

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Path of the dataset file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection, waiting for in-flight queries
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Closed dataset {}", self.path.display());
    }
}

#[derive(sqlx::FromRow)]
struct PrecipitationRow {
    date: String,
    prcp: Option<f64>,
}

#[derive(sqlx::FromRow)]
struct StationRow {
    station: String,
    name: String,
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    station: String,
    observations: i64,
}

#[derive(sqlx::FromRow)]
struct TobsRow {
    date: String,
    tobs: Option<f64>,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    date: String,
    low_temp: Option<f64>,
    avg_temp: Option<f64>,
    high_temp: Option<f64>,
}

impl ObservationStore for SqliteStore {
    async fn precipitation_by_date(&self) -> Result<Vec<PrecipitationReading>> {
        let rows: Vec<PrecipitationRow> =
            sqlx::query_as("SELECT date, prcp FROM measurement ORDER BY date")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| Error::store_unavailable("precipitation scan failed", e))?;

        Ok(rows
            .into_iter()
            .map(|row| PrecipitationReading {
                date: row.date,
                precipitation: row.prcp,
            })
            .collect())
    }

    async fn stations(&self) -> Result<Vec<Station>> {
        let rows: Vec<StationRow> = sqlx::query_as("SELECT station, name FROM station")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::store_unavailable("station scan failed", e))?;

        Ok(rows
            .into_iter()
            .map(|row| Station::new(row.station, row.name))
            .collect())
    }

    async fn latest_measurement_date(&self) -> Result<Option<String>> {
        sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::store_unavailable("latest date lookup failed", e))
    }

    async fn earliest_measurement_date(&self) -> Result<Option<String>> {
        sqlx::query_scalar("SELECT MIN(date) FROM measurement")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::store_unavailable("earliest date lookup failed", e))
    }

    async fn station_activity(&self) -> Result<Vec<StationActivity>> {
        // Ties on the count fall back to station code so the ranking is stable
        let rows: Vec<ActivityRow> = sqlx::query_as(
            r#"
            SELECT station, COUNT(station) AS observations
            FROM measurement
            GROUP BY station
            ORDER BY observations DESC, station ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::store_unavailable("station activity scan failed", e))?;

        Ok(rows
            .into_iter()
            .map(|row| StationActivity {
                station_id: row.station,
                observations: row.observations,
            })
            .collect())
    }

    async fn temperature_observations(
        &self,
        station_id: &str,
        since: &str,
    ) -> Result<Vec<TemperatureObservation>> {
        let rows: Vec<TobsRow> = sqlx::query_as(
            r#"
            SELECT date, tobs
            FROM measurement
            WHERE date >= ?1
              AND station = ?2
            "#,
        )
        .bind(since)
        .bind(station_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::store_unavailable("temperature observation scan failed", e))?;

        Ok(rows
            .into_iter()
            .map(|row| TemperatureObservation {
                date: row.date,
                tobs: row.tobs,
            })
            .collect())
    }

    async fn daily_temperature_summaries(
        &self,
        range: DateRange,
    ) -> Result<Vec<DailyTemperatureSummary>> {
        // Aggregates are cast so integer-valued columns still decode as f64
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT date,
                   CAST(MIN(tobs) AS REAL) AS low_temp,
                   CAST(AVG(tobs) AS REAL) AS avg_temp,
                   CAST(MAX(tobs) AS REAL) AS high_temp
            FROM measurement
            WHERE date >= ?1
              AND (?2 IS NULL OR date <= ?2)
            GROUP BY date
            ORDER BY date
            "#,
        )
        .bind(range.start_key())
        .bind(range.end_key())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::store_unavailable("temperature summary scan failed", e))?;

        Ok(rows
            .into_iter()
            .map(|row| DailyTemperatureSummary {
                date: row.date,
                low: row.low_temp,
                avg: row.avg_temp,
                high: row.high_temp,
            })
            .collect())
    }

    async fn measurement_count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::store_unavailable("measurement count failed", e))
    }
}
