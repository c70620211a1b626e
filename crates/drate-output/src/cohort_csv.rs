//! Cohort CSV emitter.
//!
//! Writes one row per individual in the source column layout, turning day
//! indices back into `YYYY-MM-DD` dates. Absent values become empty cells, so
//! a synthetic cohort can be read by anything that reads the real extract.

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use drate_core::DayIndexer;
use drate_model::{Cohort, Individual, cohort_headers};

use crate::common::write_atomically;
use crate::error::{OutputError, Result};

/// Cells of one cohort row, in header order.
pub fn cohort_row(individual: &Individual, indexer: &DayIndexer) -> Vec<String> {
    let mut row = Vec::with_capacity(cohort_headers().len());
    row.push(
        individual
            .birth_year
            .map(|year| year.to_string())
            .unwrap_or_default(),
    );
    row.push(indexer.format(individual.death_day));
    for slot in individual.dose_days.slots() {
        row.push(indexer.format(*slot));
    }
    row
}

/// Writes the cohort as CSV to any writer.
pub fn write_cohort<W: Write>(writer: W, cohort: &Cohort, indexer: &DayIndexer) -> csv::Result<()> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(cohort_headers())?;
    for individual in cohort {
        csv.write_record(cohort_row(individual, indexer))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the cohort to `path`, replacing any existing file only on success.
pub fn write_cohort_csv(path: &Path, cohort: &Cohort, indexer: &DayIndexer) -> Result<()> {
    write_atomically(path, |writer| {
        write_cohort(writer, cohort, indexer).map_err(|source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        })
    })?;
    info!(path = %path.display(), rows = cohort.len(), "wrote cohort csv");
    Ok(())
}
