//! Route handlers

use super::AppState;
use super::responses::{
    ErrorBody, StationEntry, TemperatureStatsEntry, TobsEntry, flatten_precipitation,
};
use crate::Result;
use crate::app::services::observation_store::ObservationStore;
use crate::constants::ADVERTISED_ROUTES;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use serde_json::Value;
use tracing::{debug, instrument};

/// Plain-text listing of the available API routes
pub async fn index() -> String {
    let mut listing = String::from("Available Routes:\n");
    for route in ADVERTISED_ROUTES {
        listing.push_str(route);
        listing.push('\n');
    }
    listing
}

#[instrument(skip_all, level = "info")]
pub async fn precipitation<S: ObservationStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Value>>> {
    let readings = state.all_precipitation().await?;
    Ok(Json(flatten_precipitation(readings)))
}

#[instrument(skip_all, level = "info")]
pub async fn stations<S: ObservationStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<StationEntry>>> {
    let stations = state.all_stations().await?;
    Ok(Json(stations.into_iter().map(StationEntry::from).collect()))
}

#[instrument(skip_all, level = "info")]
pub async fn tobs<S: ObservationStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<TobsEntry>>> {
    let entries = match state.recent_temperature_observations().await? {
        Some(recent) => {
            debug!(
                "Serving {} observations for station {}",
                recent.observations.len(),
                recent.station_id
            );
            recent.observations.into_iter().map(TobsEntry::from).collect()
        }
        None => Vec::new(),
    };
    Ok(Json(entries))
}

#[instrument(skip(state), level = "info")]
pub async fn stats_from<S: ObservationStore>(
    State(state): State<AppState<S>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStatsEntry>>> {
    let summaries = state.temperature_stats_from(&start).await?;
    Ok(Json(
        summaries.into_iter().map(TemperatureStatsEntry::from).collect(),
    ))
}

#[instrument(skip(state), level = "info")]
pub async fn stats_range<S: ObservationStore>(
    State(state): State<AppState<S>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStatsEntry>>> {
    let summaries = state.temperature_stats_range(&start, &end).await?;
    Ok(Json(
        summaries.into_iter().map(TemperatureStatsEntry::from).collect(),
    ))
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    debug!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: format!("No route for {}", uri.path()),
        }),
    )
}
