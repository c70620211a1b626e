//! Writers for the derived analysis tables.

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use drate_core::{DailyDoseCounts, DayIndexer, ExposureLayout};

use crate::common::write_atomically;
use crate::error::{OutputError, Result};

pub const INTERVAL_HEADERS: [&str; 6] = ["id", "start", "stop", "event", "vaccinated", "duration"];

pub const DOSE_COUNT_HEADERS: [&str; 4] = ["day", "date", "first_doses", "all_doses"];

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

pub fn write_intervals<W: Write>(writer: W, layout: &ExposureLayout) -> csv::Result<()> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(INTERVAL_HEADERS)?;
    for interval in &layout.intervals {
        csv.write_record([
            interval.id.to_string(),
            interval.start.to_string(),
            interval.stop.to_string(),
            flag(interval.event).to_string(),
            flag(interval.vaccinated).to_string(),
            interval.duration().to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_dose_counts<W: Write>(
    writer: W,
    counts: &DailyDoseCounts,
    indexer: &DayIndexer,
) -> csv::Result<()> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(DOSE_COUNT_HEADERS)?;
    for (day, (first, all)) in counts.first_doses.iter().zip(&counts.all_doses).enumerate() {
        let day = day as i64;
        csv.write_record([
            day.to_string(),
            indexer.format(Some(day)),
            first.to_string(),
            all.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_intervals_csv(path: &Path, layout: &ExposureLayout) -> Result<()> {
    write_atomically(path, |writer| {
        write_intervals(writer, layout).map_err(|source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        })
    })?;
    info!(path = %path.display(), rows = layout.intervals.len(), "wrote exposure intervals");
    Ok(())
}

pub fn write_dose_counts_csv(
    path: &Path,
    counts: &DailyDoseCounts,
    indexer: &DayIndexer,
) -> Result<()> {
    write_atomically(path, |writer| {
        write_dose_counts(writer, counts, indexer).map_err(|source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        })
    })?;
    info!(path = %path.display(), days = counts.days(), "wrote daily dose counts");
    Ok(())
}
