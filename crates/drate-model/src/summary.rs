//! Counters reported by a simulation run.

use serde::{Deserialize, Serialize};

use crate::individual::DayIndex;

/// Outcome counters of the dose reassignment step.
///
/// `assigned + skipped() == eligible_donors` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignmentSummary {
    /// Donor sequences with at least one present dose day.
    pub eligible_donors: usize,
    pub assigned: usize,
    /// Donors seen after every synthetic individual was already assigned.
    pub skipped_pool_exhausted: usize,
    /// Donors for which no candidate within the retry bound survived long enough.
    pub skipped_no_candidate: usize,
}

impl ReassignmentSummary {
    pub fn skipped(&self) -> usize {
        self.skipped_pool_exhausted + self.skipped_no_candidate
    }

    /// Share of eligible donor sequences that could not be placed.
    pub fn skip_ratio(&self) -> f64 {
        if self.eligible_donors == 0 {
            0.0
        } else {
            self.skipped() as f64 / self.eligible_donors as f64
        }
    }
}

/// Headline numbers of a full simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub cohort_size: usize,
    pub real_deaths: usize,
    pub death_rate: f64,
    /// Last day of the observation window, inclusive.
    pub end_measure: DayIndex,
    pub simulated_deaths: usize,
    pub reassignment: ReassignmentSummary,
}
