//! Shared test utilities and fixtures for observation store tests

use crate::app::models::{Measurement, Station};
use crate::app::services::observation_store::SqliteStore;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;


/// Temporary dataset file, deleted when dropped
pub struct TestDataset {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestDataset {
    /// Open the dataset read-only the way the service does
    pub async fn open(&self) -> SqliteStore {
        SqliteStore::open(&self.path, 2, Duration::from_secs(5))
            .await
            .unwrap()
    }
}

/// Create a measurement row
pub fn measurement(station: &str, date: &str, prcp: Option<f64>, tobs: Option<f64>) -> Measurement {
    Measurement {
        station_id: station.to_string(),
        date: date.to_string(),
        precipitation: prcp,
        temperature_observation: tobs,
    }
}

/// Table layout of the published dataset, including columns the service ignores
pub const DATASET_DDL: &[&str] = &[
    "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT)",
    "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT)",
];

/// Write a dataset file from raw DDL plus rows
pub async fn create_dataset_with_ddl(
    ddl: &[&str],
    stations: &[Station],
    measurements: &[Measurement],
) -> TestDataset {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("climate.sqlite");

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    for statement in ddl {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }

    for station in stations {
        sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
            .bind(&station.station_id)
            .bind(&station.name)
            .execute(&pool)
            .await
            .unwrap();
    }

    for row in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(&row.station_id)
            .bind(&row.date)
            .bind(row.precipitation)
            .bind(row.temperature_observation)
            .execute(&pool)
            .await
            .unwrap();
    }

    pool.close().await;

    TestDataset { dir, path }
}

/// Write a dataset file with the published table layout
pub async fn create_test_dataset(stations: &[Station], measurements: &[Measurement]) -> TestDataset {
    create_dataset_with_ddl(DATASET_DDL, stations, measurements).await
}

/// Stations of the standard fixture
pub fn sample_stations() -> Vec<Station> {
    vec![
        Station::new("S1", "WAIKIKI 717.2, HI US"),
        Station::new("S2", "KANEOHE 838.1, HI US"),
        Station::new("S3", "KUALOA RANCH HEADQUARTERS 886.9, HI US"),
    ]
}

/// Measurements of the standard fixture
///
/// S1 is the most active station with five rows; the latest date in the
/// dataset is 2017-08-23, so its trailing window starts on 2016-08-23.
pub fn sample_measurements() -> Vec<Measurement> {
    vec![
        measurement("S1", "2016-08-01", Some(0.1), Some(70.0)),
        measurement("S1", "2016-09-01", Some(0.0), Some(72.0)),
        measurement("S1", "2017-01-01", None, Some(65.0)),
        measurement("S1", "2017-06-01", Some(0.5), Some(80.0)),
        measurement("S1", "2017-08-23", Some(0.2), Some(78.0)),
        measurement("S2", "2017-06-01", Some(1.2), Some(76.0)),
        measurement("S2", "2017-08-01", None, None),
        measurement("S2", "2017-08-20", Some(0.3), Some(81.0)),
        measurement("S3", "2015-01-01", Some(0.0), Some(60.0)),
    ]
}

/// Write the standard fixture
pub async fn create_sample_dataset() -> TestDataset {
    create_test_dataset(&sample_stations(), &sample_measurements()).await
}
