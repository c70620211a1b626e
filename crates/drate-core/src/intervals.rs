//! Time-varying exposure layout for survival models.
//!
//! Every individual contributes an unvaccinated interval from day 0 until the
//! first dose (plus lag) or the end of follow-up, and, when exposure starts
//! before follow-up ends, a vaccinated interval from there to the end.

use drate_model::{AnalysisOptions, Cohort, DayIndex, Individual, IndividualId};
use tracing::debug;

use crate::age::filter_plausible_ages;
use crate::rate::observation_window;

/// Added to the stop of a zero-length interval that ends in death.
pub const ZERO_LENGTH_EVENT_OFFSET: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureInterval {
    pub id: IndividualId,
    pub start: f64,
    pub stop: f64,
    /// Death occurred at `stop`.
    pub event: bool,
    pub vaccinated: bool,
}

impl ExposureInterval {
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }

    fn new(id: IndividualId, start: DayIndex, stop: DayIndex, event: bool, vaccinated: bool) -> Self {
        let offset = if event && start == stop {
            ZERO_LENGTH_EVENT_OFFSET
        } else {
            0.0
        };
        Self {
            id,
            start: start as f64,
            stop: stop as f64 + offset,
            event,
            vaccinated,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExposureLayout {
    pub intervals: Vec<ExposureInterval>,
    /// Last day of follow-up for censored individuals.
    pub end_measure: DayIndex,
    /// Individuals left out for a missing or implausible age.
    pub excluded: usize,
}

impl ExposureLayout {
    pub fn events(&self, vaccinated: bool) -> usize {
        self.intervals
            .iter()
            .filter(|interval| interval.vaccinated == vaccinated && interval.event)
            .count()
    }

    pub fn person_days(&self, vaccinated: bool) -> f64 {
        self.intervals
            .iter()
            .filter(|interval| interval.vaccinated == vaccinated)
            .map(ExposureInterval::duration)
            .sum()
    }
}

/// Splits one individual's follow-up at the start of vaccinated exposure.
pub fn individual_intervals(
    individual: &Individual,
    end_measure: DayIndex,
    lag_days: DayIndex,
) -> Vec<ExposureInterval> {
    let end_day = individual.death_day.unwrap_or(end_measure);
    let died_at = |day: DayIndex| individual.death_day == Some(day);
    let exposure_start = individual
        .dose_days
        .first_dose_day()
        .map(|first| first.saturating_add(lag_days));

    let unvaccinated_stop = match exposure_start {
        Some(start) => end_day.min(start),
        None => end_day,
    };
    let mut intervals = vec![ExposureInterval::new(
        individual.id,
        0,
        unvaccinated_stop,
        died_at(unvaccinated_stop),
        false,
    )];
    if let Some(start) = exposure_start
        && start < end_day
    {
        intervals.push(ExposureInterval::new(
            individual.id,
            start,
            end_day,
            died_at(end_day),
            true,
        ));
    }
    intervals
}

/// Builds the interval table for every individual with a plausible age.
pub fn build_exposure_intervals(cohort: &Cohort, options: &AnalysisOptions) -> ExposureLayout {
    let kept = filter_plausible_ages(cohort, options.reference_year, options.max_age);
    let excluded = cohort.len() - kept.len();
    let end_measure = observation_window(&kept, options.fallback_end_day);

    let intervals: Vec<ExposureInterval> = kept
        .iter()
        .flat_map(|person| individual_intervals(person, end_measure, options.lag_days))
        .collect();
    debug!(
        individuals = kept.len(),
        excluded,
        intervals = intervals.len(),
        end_measure,
        "built exposure intervals"
    );
    ExposureLayout {
        intervals,
        end_measure,
        excluded,
    }
}
