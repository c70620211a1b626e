use std::path::PathBuf;

use chrono::NaiveDate;

use drate_ingest::IngestStats;
use drate_model::{DayIndex, SimulationSummary};

#[derive(Debug)]
pub struct SimulateResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary_json: Option<PathBuf>,
    pub ingest: IngestStats,
    pub summary: SimulationSummary,
}

#[derive(Debug)]
pub struct ExportAgeResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub age: i32,
    pub reference_year: i32,
    pub source_rows: usize,
    pub exported_rows: usize,
    pub exported_deaths: usize,
}

#[derive(Debug)]
pub struct IntervalsResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub end_measure: DayIndex,
    pub excluded: usize,
    pub intervals: usize,
    /// Indexed by `vaccinated as usize`.
    pub events: [usize; 2],
    pub person_days: [f64; 2],
}

#[derive(Debug)]
pub struct DoseCountsResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub days: usize,
    pub first_doses: usize,
    pub all_doses: usize,
    pub vaccination_start: Option<NaiveDate>,
}
