pub mod cohort;
pub mod error;
pub mod individual;
pub mod options;
pub mod schema;
pub mod summary;

pub use cohort::{Cohort, IndividualRecord};
pub use error::{DrateError, Result};
pub use individual::{DOSE_SLOTS, DayIndex, DoseDays, Individual, IndividualId};
pub use options::{
    AnalysisOptions, DEFAULT_FALLBACK_END_DAY, DEFAULT_MAX_AGE, DEFAULT_REFERENCE_YEAR,
    DEFAULT_RETRIES, DEFAULT_SEED, SimulationOptions, default_epoch,
};
pub use schema::{
    BIRTH_YEAR_COLUMN, DATE_FORMAT, DEATH_DATE_COLUMN, DOSE_DATE_COLUMNS, cohort_headers,
};
pub use summary::{ReassignmentSummary, SimulationSummary};
