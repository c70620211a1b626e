//! JSON record of a simulation run.

use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use drate_model::{SimulationOptions, SimulationSummary};

use crate::common::write_atomically;
use crate::error::{OutputError, Result};

const SUMMARY_SCHEMA: &str = "drate.simulation-summary";
const SUMMARY_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct SimulationSummaryPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    input: String,
    output: String,
    options: &'a SimulationOptions,
    summary: &'a SimulationSummary,
    skipped: usize,
}

/// Writes the run's options and headline counters as pretty-printed JSON.
pub fn write_simulation_summary_json(
    path: &Path,
    input: &Path,
    output: &Path,
    options: &SimulationOptions,
    summary: &SimulationSummary,
) -> Result<()> {
    let payload = SimulationSummaryPayload {
        schema: SUMMARY_SCHEMA,
        schema_version: SUMMARY_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        input: input.display().to_string(),
        output: output.display().to_string(),
        options,
        summary,
        skipped: summary.reassignment.skipped(),
    };
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(writer, &payload).map_err(|source| OutputError::Json {
            path: path.to_path_buf(),
            source,
        })
    })?;
    info!(path = %path.display(), "wrote run summary");
    Ok(())
}
