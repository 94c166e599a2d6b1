//! Inspect command implementation
//!
//! Verifies the declared schema of a dataset and reports its size, date span
//! and most active station.

use super::shared::{load_inspect_configuration, open_verified_store, setup_logging};
use crate::app::models::DatasetSummary;
use crate::app::services::observation_store::SchemaReport;
use crate::app::services::query_service::QueryService;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything the inspect command reports
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub database: PathBuf,
    pub schema: SchemaReport,
    pub summary: DatasetSummary,
}

/// Inspect command runner
pub async fn run_inspect(args: InspectArgs) -> Result<()> {
    setup_logging(&args.log)?;

    info!("Inspecting dataset");
    debug!("Inspect arguments: {:?}", args);

    args.validate()?;
    let config = load_inspect_configuration(&args)?;

    let report = build_report(&config).await?;

    let output = match args.format {
        OutputFormat::Human => render_human(&report),
        OutputFormat::Json => render_json(&report)?,
    };
    println!("{}", output);

    Ok(())
}

/// Open the dataset, verify it and collect the summary
pub async fn build_report(config: &Config) -> Result<InspectReport> {
    let (store, schema) = open_verified_store(config).await?;
    let service = QueryService::new(store);
    let summary = service.dataset_summary().await?;
    service.store().close().await;

    Ok(InspectReport {
        database: config.database.path.clone(),
        schema,
        summary,
    })
}

/// Pretty-printed JSON rendering of a report
pub fn render_json(report: &InspectReport) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| Error::serialization("cannot encode inspect report", e))
}

/// Human-readable rendering of a report
pub fn render_human(report: &InspectReport) -> String {
    let summary = &report.summary;
    let mut lines = Vec::new();

    lines.push(format!("{}", "Climate Dataset".bold()));
    lines.push("===============".to_string());
    lines.push(format!("Database:      {}", report.database.display()));
    lines.push(format!(
        "Schema:        {} (measurement: {}; station: {})",
        "ok".green(),
        report.schema.measurement_columns.join(", "),
        report.schema.station_columns.join(", ")
    ));
    lines.push(format!("Stations:      {}", summary.station_count));
    lines.push(format!("Measurements:  {}", summary.measurement_count));

    match (&summary.first_date, &summary.last_date) {
        (Some(first), Some(last)) => {
            lines.push(format!("Date span:     {} to {}", first, last));
        }
        _ => lines.push(format!("Date span:     {}", "no measurements".yellow())),
    }

    match &summary.most_active_station {
        Some(activity) => lines.push(format!(
            "Most active:   {} ({} observations)",
            activity.station_id.cyan(),
            activity.observations
        )),
        None => lines.push(format!("Most active:   {}", "none".yellow())),
    }

    lines.join("\n")
}
