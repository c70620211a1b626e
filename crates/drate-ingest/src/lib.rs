pub mod cohort_csv;
pub mod error;

pub use cohort_csv::{IngestStats, IngestedCohort, read_cohort_csv, read_cohort_from_reader};
pub use error::{IngestError, Result};
