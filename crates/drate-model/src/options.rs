//! Configuration options for simulation and analysis runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DrateError, Result};
use crate::individual::DayIndex;

/// Observation window length used when the real cohort has no deaths.
pub const DEFAULT_FALLBACK_END_DAY: DayIndex = 1533;

/// Seed shared by the death and dose random streams.
pub const DEFAULT_SEED: u64 = 42;

/// Upper bound on candidates tried per donor sequence.
pub const DEFAULT_RETRIES: usize = 10_000;

/// Year against which ages are computed.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2023;

/// Oldest plausible age; older rows are treated as data errors.
pub const DEFAULT_MAX_AGE: i32 = 113;

/// Day zero of every day index: 2020-01-01.
pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("2020-01-01 is a valid date")
}

/// Options controlling the null-world simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// Date mapped to day index 0.
    pub epoch: NaiveDate,

    /// Observation window (days) when no real death is observed.
    pub fallback_end_day: DayIndex,

    /// Seed for both random streams.
    ///
    /// The death and dose streams are seeded independently with this same
    /// value, so a run is fully reproducible from the seed alone.
    pub seed: u64,

    /// Maximum candidates scanned per donor before it is skipped.
    pub retries: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            fallback_end_day: DEFAULT_FALLBACK_END_DAY,
            seed: DEFAULT_SEED,
            retries: DEFAULT_RETRIES,
        }
    }
}

impl SimulationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_epoch(mut self, epoch: NaiveDate) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub fn with_fallback_end_day(mut self, day: DayIndex) -> Self {
        self.fallback_end_day = day;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Reject values no simulation can run with.
    pub fn validate(&self) -> Result<()> {
        if self.fallback_end_day < 0 {
            return Err(DrateError::InvalidOption {
                name: "fallback_end_day",
                reason: format!("must be non-negative, got {}", self.fallback_end_day),
            });
        }
        Ok(())
    }
}

/// Options for the age filter and the time-varying exposure layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub epoch: NaiveDate,
    pub reference_year: i32,
    /// Rows with an age outside `0..=max_age` are dropped.
    pub max_age: i32,
    /// Days after the first dose before exposure counts as vaccinated.
    pub lag_days: DayIndex,
    pub fallback_end_day: DayIndex,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            reference_year: DEFAULT_REFERENCE_YEAR,
            max_age: DEFAULT_MAX_AGE,
            lag_days: 0,
            fallback_end_day: DEFAULT_FALLBACK_END_DAY,
        }
    }
}

impl AnalysisOptions {
    pub fn validate(&self) -> Result<()> {
        if self.lag_days < 0 {
            return Err(DrateError::InvalidOption {
                name: "lag_days",
                reason: format!("must be non-negative, got {}", self.lag_days),
            });
        }
        if self.max_age < 0 {
            return Err(DrateError::InvalidOption {
                name: "max_age",
                reason: format!("must be non-negative, got {}", self.max_age),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = SimulationOptions::default();
        assert_eq!(options.epoch.to_string(), "2020-01-01");
        assert_eq!(options.fallback_end_day, 1533);
        assert_eq!(options.seed, 42);
        assert_eq!(options.retries, 10_000);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn negative_window_is_rejected() {
        let options = SimulationOptions::default().with_fallback_end_day(-1);
        let error = options.validate().unwrap_err();
        assert!(error.to_string().contains("fallback_end_day"));
    }

    #[test]
    fn negative_lag_is_rejected() {
        let options = AnalysisOptions {
            lag_days: -14,
            ..AnalysisOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
