//! Output writers for synthetic cohorts and derived tables.
//!
//! Every file is written through a temporary sibling and renamed into place,
//! so an interrupted run never leaves a truncated file behind.

pub mod cohort_csv;
pub mod common;
pub mod error;
pub mod layouts;
pub mod summary_json;

pub use cohort_csv::{cohort_row, write_cohort, write_cohort_csv};
pub use common::{ensure_parent_dir, write_atomically};
pub use error::{OutputError, Result};
pub use layouts::{
    DOSE_COUNT_HEADERS, INTERVAL_HEADERS, write_dose_counts, write_dose_counts_csv,
    write_intervals, write_intervals_csv,
};
pub use summary_json::write_simulation_summary_json;
