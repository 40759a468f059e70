// src/io/reporting.rs

use crate::simulation::engine::{DayRecord, SimulationResult};
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the per-day trace of a run to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/days.csv").
/// * `data` - The records returned by `InventorySimulator::run_with_trace`.
pub fn write_day_log<P: AsRef<Path>>(file_path: P, data: &[DayRecord]) -> Result<(), ReportError> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!(rows = data.len(), path = %path.display(), "exported day log");
    Ok(())
}

/// Writes one or more run summaries, one row each.
pub fn write_summary<P: AsRef<Path>>(
    file_path: P,
    results: &[SimulationResult],
) -> Result<(), ReportError> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for result in results {
        wtr.serialize(result)?;
    }
    wtr.flush()?;

    info!(rows = results.len(), path = %path.display(), "exported summary");
    Ok(())
}
