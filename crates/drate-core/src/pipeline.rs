//! Bias-baseline simulation with explicit stages.
//!
//! 1. **Estimate**: observation window and clipped death rate of the real cohort
//! 2. **Simulate deaths**: null-world cohort of the same size
//! 3. **Reassign doses**: real dose sequences onto synthetic survivors
//!
//! Both random streams are seeded from `SimulationOptions::seed`.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use drate_model::{Cohort, Result, SimulationOptions, SimulationSummary};

use crate::rate::{estimate_death_rate, observation_window};
use crate::reassign::{Assignment, ReassignmentEngine, apply_assignments, eligible_donors};
use crate::report::Reporter;
use crate::simulate::simulate_deaths;

/// Output of a complete simulation run.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    /// Synthetic cohort with simulated deaths and transplanted doses.
    pub cohort: Cohort,
    pub summary: SimulationSummary,
    pub assignments: Vec<Assignment>,
}

/// Builds the synthetic bias-baseline cohort for `real`.
pub fn simulate_bias_baseline(
    real: &Cohort,
    options: &SimulationOptions,
    reporter: &mut dyn Reporter,
) -> Result<SimulationRun> {
    options.validate()?;

    // =========================================================================
    // Stage 1: Estimate
    // =========================================================================
    let end_measure = observation_window(real, options.fallback_end_day);
    let death_rate = estimate_death_rate(real);
    reporter.record(&format!("Measurement window (END_MEASURE): {end_measure} days"));
    info!(
        cohort_size = real.len(),
        real_deaths = real.death_count(),
        death_rate,
        end_measure,
        "estimated death rate"
    );

    // =========================================================================
    // Stage 2: Simulate deaths
    // =========================================================================
    let mut death_rng = StdRng::seed_from_u64(options.seed);
    let mut synthetic = info_span!("simulate_deaths")
        .in_scope(|| simulate_deaths(real, end_measure, death_rate, &mut death_rng))?;
    let simulated_deaths = synthetic.death_count();

    // =========================================================================
    // Stage 3: Reassign doses
    // =========================================================================
    let span = info_span!("reassign_doses", retries = options.retries);
    let _guard = span.enter();
    let start = Instant::now();
    let donors = eligible_donors(real);
    let mut dose_rng = StdRng::seed_from_u64(options.seed);
    let engine = ReassignmentEngine::new(options.retries);
    let outcome = engine.run(&synthetic, &donors, &mut dose_rng, reporter);
    apply_assignments(&mut synthetic, &outcome.assignments);
    info!(
        eligible_donors = outcome.summary.eligible_donors,
        assigned = outcome.summary.assigned,
        skipped = outcome.summary.skipped(),
        duration_ms = start.elapsed().as_millis(),
        "dose reassignment complete"
    );

    Ok(SimulationRun {
        cohort: synthetic,
        summary: SimulationSummary {
            cohort_size: real.len(),
            real_deaths: real.death_count(),
            death_rate,
            end_measure,
            simulated_deaths,
            reassignment: outcome.summary,
        },
        assignments: outcome.assignments,
    })
}
