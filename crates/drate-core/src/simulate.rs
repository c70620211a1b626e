//! Null-world death simulator.
//!
//! Produces a synthetic cohort the size of the real one in which death is a
//! coin flip with the empirical death rate and death days are uniform over the
//! observation window. Nothing in this world depends on vaccination.

use rand::Rng;
use tracing::debug;

use drate_model::{Cohort, DayIndex, DoseDays, DrateError, IndividualRecord, Result};

/// Draws `n` independent death outcomes.
///
/// Each individual dies with probability `death_rate`; those who die get a day
/// drawn uniformly from `0..=end_measure`. The Bernoulli outcomes are drawn
/// first for the whole population, then the death days, so the output is a
/// pure function of the generator state and `(n, end_measure, death_rate)`.
pub fn simulate_death_days<R: Rng + ?Sized>(
    n: usize,
    end_measure: DayIndex,
    death_rate: f64,
    rng: &mut R,
) -> Result<Vec<Option<DayIndex>>> {
    if !(0.0..=1.0).contains(&death_rate) {
        return Err(DrateError::InvalidDeathRate(death_rate));
    }
    if end_measure < 0 {
        return Err(DrateError::InvalidOption {
            name: "end_measure",
            reason: format!("must be non-negative, got {end_measure}"),
        });
    }
    let will_die: Vec<bool> = (0..n)
        .map(|_| rng.random::<f64>() < death_rate)
        .collect();
    let death_days = will_die
        .into_iter()
        .map(|dies| dies.then(|| rng.random_range(0..=end_measure)))
        .collect();
    Ok(death_days)
}

/// Builds the synthetic cohort from the real one.
///
/// Each synthetic individual inherits the birth year of the real individual at
/// the same position, receives a fresh identifier, a simulated death day, and
/// no doses.
pub fn simulate_deaths<R: Rng + ?Sized>(
    real: &Cohort,
    end_measure: DayIndex,
    death_rate: f64,
    rng: &mut R,
) -> Result<Cohort> {
    let death_days = simulate_death_days(real.len(), end_measure, death_rate, rng)?;
    let synthetic = Cohort::from_records(real.iter().zip(death_days).map(|(person, death_day)| {
        IndividualRecord {
            birth_year: person.birth_year,
            death_day,
            dose_days: DoseDays::empty(),
        }
    }));
    debug!(
        cohort_size = synthetic.len(),
        simulated_deaths = synthetic.death_count(),
        end_measure,
        death_rate,
        "simulated deaths"
    );
    Ok(synthetic)
}
