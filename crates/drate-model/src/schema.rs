//! Column layout shared by the real cohort extract and the synthetic output.

use crate::individual::DOSE_SLOTS;

/// Year of birth.
pub const BIRTH_YEAR_COLUMN: &str = "Rok_narozeni";

/// Date of death, empty when the individual was alive at the end of observation.
pub const DEATH_DATE_COLUMN: &str = "DatumUmrti";

/// Vaccination dates, one column per dose slot.
pub const DOSE_DATE_COLUMNS: [&str; DOSE_SLOTS] = [
    "Datum_1", "Datum_2", "Datum_3", "Datum_4", "Datum_5", "Datum_6", "Datum_7",
];

/// Format used for every date cell read or written.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Header row of a cohort CSV, in output order.
pub fn cohort_headers() -> Vec<&'static str> {
    let mut headers = Vec::with_capacity(2 + DOSE_SLOTS);
    headers.push(BIRTH_YEAR_COLUMN);
    headers.push(DEATH_DATE_COLUMN);
    headers.extend(DOSE_DATE_COLUMNS);
    headers
}
