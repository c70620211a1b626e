//! Reads a cohort extract into day-indexed individual records.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use drate_core::DayIndexer;
use drate_model::{
    BIRTH_YEAR_COLUMN, Cohort, DEATH_DATE_COLUMN, DOSE_DATE_COLUMNS, DOSE_SLOTS, DayIndex,
    DoseDays, IndividualRecord,
};

use crate::error::{IngestError, Result};

/// Counters for cells that could not be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows: usize,
    /// Non-empty birth-year cells that are not integers.
    pub invalid_birth_years: usize,
    /// Non-empty date cells that are not valid dates.
    pub invalid_dates: usize,
    /// Dose columns absent from the header; treated as empty.
    pub missing_dose_columns: usize,
}

#[derive(Debug, Clone)]
pub struct IngestedCohort {
    pub cohort: Cohort,
    pub stats: IngestStats,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_lowercase()
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    let wanted = name.to_lowercase();
    headers
        .iter()
        .position(|header| normalize_header(header) == wanted)
}

/// Column positions of the fields a cohort needs.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    birth_year: usize,
    death_date: usize,
    doses: [Option<usize>; DOSE_SLOTS],
}

impl ColumnMap {
    fn resolve(headers: &StringRecord, path: &Path) -> Result<Self> {
        let required = |name: &str| {
            find_column(headers, name).ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
                path: path.to_path_buf(),
            })
        };
        let birth_year = required(BIRTH_YEAR_COLUMN)?;
        let death_date = required(DEATH_DATE_COLUMN)?;
        let mut doses = [None; DOSE_SLOTS];
        for (slot, name) in DOSE_DATE_COLUMNS.iter().enumerate() {
            doses[slot] = find_column(headers, name);
        }
        Ok(Self {
            birth_year,
            death_date,
            doses,
        })
    }

    fn missing_dose_columns(&self) -> usize {
        self.doses.iter().filter(|column| column.is_none()).count()
    }
}

fn parse_birth_year(raw: &str, stats: &mut IngestStats) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<i32>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0)
            .filter(|v| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(v))
            .map(|v| v as i32)
    });
    if parsed.is_none() {
        stats.invalid_birth_years += 1;
    }
    parsed
}

fn parse_day(
    raw: Option<&str>,
    indexer: &DayIndexer,
    stats: &mut IngestStats,
) -> Option<DayIndex> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let day = indexer.parse(raw);
    if day.is_none() {
        stats.invalid_dates += 1;
    }
    day
}

fn parse_record(
    record: &StringRecord,
    columns: &ColumnMap,
    indexer: &DayIndexer,
    stats: &mut IngestStats,
) -> IndividualRecord {
    let birth_year = record
        .get(columns.birth_year)
        .and_then(|raw| parse_birth_year(raw, stats));
    let death_day = parse_day(record.get(columns.death_date), indexer, stats);
    let mut slots = [None; DOSE_SLOTS];
    for (slot, column) in columns.doses.iter().enumerate() {
        slots[slot] = column.and_then(|index| parse_day(record.get(index), indexer, stats));
    }
    IndividualRecord {
        birth_year,
        death_day,
        dose_days: DoseDays::new(slots),
    }
}

/// Reads a cohort from any CSV source. `source` names it in errors.
pub fn read_cohort_from_reader<R: Read>(
    reader: R,
    source: &Path,
    epoch: NaiveDate,
) -> Result<IngestedCohort> {
    let csv_error = |error: csv::Error| IngestError::CsvRead {
        path: source.to_path_buf(),
        source: error,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = ColumnMap::resolve(&headers, source)?;
    let indexer = DayIndexer::new(epoch);

    let mut stats = IngestStats {
        missing_dose_columns: columns.missing_dose_columns(),
        ..IngestStats::default()
    };
    let mut cohort = Cohort::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        stats.rows += 1;
        cohort.push(parse_record(&record, &columns, &indexer, &mut stats));
    }

    if stats.invalid_dates > 0 || stats.invalid_birth_years > 0 {
        warn!(
            source = %source.display(),
            invalid_dates = stats.invalid_dates,
            invalid_birth_years = stats.invalid_birth_years,
            "unparseable cells treated as absent"
        );
    }
    debug!(
        source = %source.display(),
        rows = stats.rows,
        deaths = cohort.death_count(),
        missing_dose_columns = stats.missing_dose_columns,
        "read cohort"
    );
    Ok(IngestedCohort { cohort, stats })
}

/// Reads a cohort CSV with `Rok_narozeni`, `DatumUmrti`, and `Datum_1`..`Datum_7`.
///
/// Header matching ignores case, surrounding whitespace, and a byte-order mark.
/// Extra columns are ignored; missing dose columns read as empty.
pub fn read_cohort_csv(path: &Path, epoch: NaiveDate) -> Result<IngestedCohort> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|error| IngestError::CsvRead {
        path: path.to_path_buf(),
        source: csv::Error::from(error),
    })?;
    read_cohort_from_reader(file, path, epoch)
}
