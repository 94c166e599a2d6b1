//! JSON response shapes
//!
//! Field names follow the published API: lower-case `station`/`name` and
//! `date`/`tobs` records, title-case temperature statistics.

use crate::app::models::{
    DailyTemperatureSummary, PrecipitationReading, Station, TemperatureObservation,
};
use serde::Serialize;
use serde_json::Value;

/// Flatten readings into `[date, value, date, value, ...]`
///
/// Missing precipitation becomes `null`, so the array always holds exactly
/// two entries per reading.
pub fn flatten_precipitation(readings: Vec<PrecipitationReading>) -> Vec<Value> {
    let mut flat = Vec::with_capacity(readings.len() * 2);
    for reading in readings {
        flat.push(Value::String(reading.date));
        flat.push(
            reading
                .precipitation
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        );
    }
    flat
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationEntry {
    pub station: String,
    pub name: String,
}

impl From<Station> for StationEntry {
    fn from(station: Station) -> Self {
        Self {
            station: station.station_id,
            name: station.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TobsEntry {
    pub date: String,
    pub tobs: Option<f64>,
}

impl From<TemperatureObservation> for TobsEntry {
    fn from(observation: TemperatureObservation) -> Self {
        Self {
            date: observation.date,
            tobs: observation.tobs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureStatsEntry {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Low Temp")]
    pub low: Option<f64>,
    #[serde(rename = "Avg Temp")]
    pub avg: Option<f64>,
    #[serde(rename = "High Temp")]
    pub high: Option<f64>,
}

impl From<DailyTemperatureSummary> for TemperatureStatsEntry {
    fn from(summary: DailyTemperatureSummary) -> Self {
        Self {
            date: summary.date,
            low: summary.low,
            avg: summary.avg,
            high: summary.high,
        }
    }
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
