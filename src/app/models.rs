//! Data models for the climate API
//!
//! Core structures for weather station metadata, daily measurement rows and
//! the derived records returned by the query service.

use crate::constants::{DATE_FORMAT, TRAILING_WINDOW_DAYS};
use crate::{Error, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// =============================================================================
// Stored Rows
// =============================================================================

/// Weather station metadata
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Station {
    /// Unique station code (e.g. "USC00519281")
    pub station_id: String,

    /// Human-readable station name
    pub name: String,
}

impl Station {
    pub fn new(station_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            name: name.into(),
        }
    }
}

/// A single daily measurement row
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Measurement {
    /// Station that recorded the measurement
    pub station_id: String,

    /// Observation date as stored, `YYYY-MM-DD`
    pub date: String,

    /// Precipitation amount, absent when not recorded
    pub precipitation: Option<f64>,

    /// Temperature observation, absent when not recorded
    pub temperature_observation: Option<f64>,
}

// =============================================================================
// Derived Records
// =============================================================================

/// Precipitation reading for one measurement row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationReading {
    pub date: String,
    pub precipitation: Option<f64>,
}

/// Temperature observation for one measurement row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: Option<f64>,
}

/// Number of measurement rows recorded by a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationActivity {
    pub station_id: String,
    pub observations: i64,
}

/// Minimum, mean and maximum temperature observed on one date
///
/// The statistics are absent when every row for the date lacks a
/// temperature observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTemperatureSummary {
    pub date: String,
    pub low: Option<f64>,
    pub avg: Option<f64>,
    pub high: Option<f64>,
}

/// Trailing-year observations of the most active station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentTemperatures {
    /// Station with the most measurement rows
    pub station_id: String,

    /// Inclusive lower bound of the window
    pub first_date: String,

    /// Latest date recorded anywhere in the dataset
    pub last_date: String,

    pub observations: Vec<TemperatureObservation>,
}

/// Overview of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub station_count: i64,
    pub measurement_count: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub most_active_station: Option<StationActivity>,
}

// =============================================================================
// Date Handling
// =============================================================================

/// Parse a caller-supplied ISO calendar date
///
/// Only unsigned four-digit years without surrounding whitespace are
/// accepted. Stored dates are compared as text, so every bound has to render
/// as a plain `YYYY-MM-DD` key.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        Error::invalid_argument(format!(
            "'{}' is not a valid YYYY-MM-DD date: {}",
            value, e
        ))
    })?;

    let is_digit = |c: char| c.is_ascii_digit();
    if !value.starts_with(is_digit) || !value.ends_with(is_digit) {
        return Err(Error::invalid_argument(format!(
            "'{}' is not a valid YYYY-MM-DD date: unexpected leading or trailing characters",
            value
        )));
    }
    if !(0..=9999).contains(&date.year()) {
        return Err(Error::invalid_argument(format!(
            "'{}' is not a valid YYYY-MM-DD date: year must have four digits",
            value
        )));
    }

    Ok(date)
}

/// Format a date the way the stored `date` column is written
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Start of the trailing window ending at `last_date`
pub fn trailing_window_start(last_date: NaiveDate) -> NaiveDate {
    last_date - Duration::days(TRAILING_WINDOW_DAYS)
}

/// Inclusive date range used to filter measurements
///
/// A missing `end` leaves the range open towards the latest date. Bounds are
/// compared against the stored text, so they are always rendered zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Parse a range from request path segments
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self> {
        let start = parse_date(start)?;
        let end = end.map(parse_date).transpose()?;
        Ok(Self { start, end })
    }

    pub fn start_key(&self) -> String {
        format_date(self.start)
    }

    pub fn end_key(&self) -> Option<String> {
        self.end.map(format_date)
    }
}
