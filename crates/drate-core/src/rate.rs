//! Empirical death probability and observation window of the real cohort.

use drate_model::{Cohort, DayIndex};

/// Lowest death probability handed to the simulator.
pub const DEATH_RATE_FLOOR: f64 = 1e-4;

/// Highest death probability handed to the simulator.
pub const DEATH_RATE_CEILING: f64 = 0.999;

/// Clamp a raw death proportion into `[DEATH_RATE_FLOOR, DEATH_RATE_CEILING]`.
///
/// NaN (no individuals at all) maps to the floor.
pub fn clip_death_rate(raw: f64) -> f64 {
    if raw.is_nan() {
        return DEATH_RATE_FLOOR;
    }
    raw.clamp(DEATH_RATE_FLOOR, DEATH_RATE_CEILING)
}

/// Share of the cohort with an observed death, clipped so that the
/// simulated population always contains both deaths and survivors.
///
/// This is one point estimate over the whole window; it is not stratified by
/// age or calendar time.
pub fn estimate_death_rate(cohort: &Cohort) -> f64 {
    if cohort.is_empty() {
        return DEATH_RATE_FLOOR;
    }
    clip_death_rate(cohort.death_count() as f64 / cohort.len() as f64)
}

/// Last day of observation: the latest real death, or `fallback` if nobody died.
pub fn observation_window(cohort: &Cohort, fallback: DayIndex) -> DayIndex {
    cohort.max_death_day().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use drate_model::{DoseDays, IndividualRecord};

    use super::*;

    fn cohort(deaths: &[Option<DayIndex>]) -> Cohort {
        Cohort::from_records(deaths.iter().map(|death_day| IndividualRecord {
            birth_year: Some(1953),
            death_day: *death_day,
            dose_days: DoseDays::empty(),
        }))
    }

    #[test]
    fn rate_is_death_share() {
        let rate = estimate_death_rate(&cohort(&[Some(1), None, None, None]));
        assert!((rate - 0.25).abs() < 1e-12);
    }

    #[test]
    fn all_survivors_clip_to_floor() {
        let rate = estimate_death_rate(&cohort(&[None; 50]));
        assert_eq!(rate, DEATH_RATE_FLOOR);
    }

    #[test]
    fn all_deaths_clip_to_ceiling() {
        let rate = estimate_death_rate(&cohort(&[Some(3); 50]));
        assert_eq!(rate, DEATH_RATE_CEILING);
    }

    #[test]
    fn empty_cohort_uses_floor() {
        assert_eq!(estimate_death_rate(&Cohort::new()), DEATH_RATE_FLOOR);
        assert_eq!(clip_death_rate(f64::NAN), DEATH_RATE_FLOOR);
    }

    #[test]
    fn window_is_latest_death_or_fallback() {
        assert_eq!(observation_window(&cohort(&[Some(12), None, Some(700)]), 1533), 700);
        assert_eq!(observation_window(&cohort(&[None, None]), 1533), 1533);
    }
}
