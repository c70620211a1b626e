pub mod age;
pub mod datetime;
pub mod dose_counts;
pub mod intervals;
pub mod pipeline;
pub mod rate;
pub mod reassign;
pub mod report;
pub mod simulate;

pub use age::{filter_by_age, filter_plausible_ages, has_plausible_age};
pub use datetime::{DayIndexer, parse_date};
pub use dose_counts::{DailyDoseCounts, daily_dose_counts};
pub use intervals::{
    ExposureInterval, ExposureLayout, ZERO_LENGTH_EVENT_OFFSET, build_exposure_intervals,
    individual_intervals,
};
pub use pipeline::{SimulationRun, simulate_bias_baseline};
pub use rate::{
    DEATH_RATE_CEILING, DEATH_RATE_FLOOR, clip_death_rate, estimate_death_rate,
    observation_window,
};
pub use reassign::{
    Assignment, DonorSequence, Placement, ReassignmentEngine, ReassignmentOutcome,
    UnassignedPool, apply_assignments, eligible_donors,
};
pub use report::{NullReporter, Reporter, TracingReporter};
pub use simulate::{simulate_death_days, simulate_deaths};
