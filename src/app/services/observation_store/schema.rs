//! Declared schema verification
//!
//! The service works against a fixed, statically declared layout rather than
//! reflecting whatever the file contains. At startup the store lists the
//! columns of each declared table and refuses to serve if any are missing.
//! Extra columns are tolerated.

use super::sqlite::SqliteStore;
use crate::constants::{measurement, station};
use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, warn};

/// Columns found for each declared table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub measurement_columns: Vec<String>,
    pub station_columns: Vec<String>,
}

impl SqliteStore {
    /// Check that both declared tables exist with all declared columns
    pub async fn verify_schema(&self) -> Result<SchemaReport> {
        let measurement_columns = self.table_columns(measurement::TABLE).await?;
        check_columns(measurement::TABLE, &measurement_columns, measurement::COLUMNS)?;

        let station_columns = self.table_columns(station::TABLE).await?;
        check_columns(station::TABLE, &station_columns, station::COLUMNS)?;

        debug!(
            "Schema verified: measurement {:?}, station {:?}",
            measurement_columns, station_columns
        );

        Ok(SchemaReport {
            measurement_columns,
            station_columns,
        })
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        sqlx::query_scalar("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
            .bind(table)
            .fetch_all(self.pool())
            .await
            .map_err(|e| Error::store_unavailable(format!("cannot inspect table '{}'", table), e))
    }
}

/// Compare the columns found in a table against the declared ones
pub fn check_columns(table: &str, found: &[String], required: &[&str]) -> Result<()> {
    if found.is_empty() {
        warn!("Declared table '{}' not found in dataset", table);
        return Err(Error::schema(table, "table does not exist"));
    }

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !found.iter().any(|f| f.eq_ignore_ascii_case(column)))
        .collect();

    if !missing.is_empty() {
        warn!("Table '{}' is missing columns {:?}", table, missing);
        return Err(Error::schema(
            table,
            format!("missing column(s): {}", missing.join(", ")),
        ));
    }

    Ok(())
}
