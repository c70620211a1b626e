use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, info_span, warn};

use drate_core::{
    DayIndexer, TracingReporter, build_exposure_intervals, daily_dose_counts, filter_by_age,
    observation_window, simulate_bias_baseline,
};
use drate_ingest::{IngestedCohort, read_cohort_csv};
use drate_model::{AnalysisOptions, SimulationOptions};
use drate_output::{
    write_cohort_csv, write_dose_counts_csv, write_intervals_csv, write_simulation_summary_json,
};

use crate::cli::{DoseCountsArgs, ExportAgeArgs, IntervalsArgs, SimulateArgs};
use crate::types::{DoseCountsResult, ExportAgeResult, IntervalsResult, SimulateResult};

/// Skip ratio above which the run is flagged as poorly matched.
const HIGH_SKIP_RATIO: f64 = 0.05;

fn load_cohort(input: &Path, epoch: NaiveDate) -> Result<IngestedCohort> {
    let ingested = read_cohort_csv(input, epoch)
        .with_context(|| format!("read cohort {}", input.display()))?;
    info!(
        input = %input.display(),
        rows = ingested.stats.rows,
        deaths = ingested.cohort.death_count(),
        "loaded cohort"
    );
    Ok(ingested)
}

pub fn simulate_options(args: &SimulateArgs) -> SimulationOptions {
    SimulationOptions::new()
        .with_epoch(args.io.epoch)
        .with_fallback_end_day(args.fallback_end_day)
        .with_seed(args.seed)
        .with_retries(args.retries)
}

pub fn run_simulate(args: &SimulateArgs) -> Result<SimulateResult> {
    let span = info_span!("simulate", input = %args.io.input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let options = simulate_options(args);
    let ingested = load_cohort(&args.io.input, options.epoch)?;

    let mut reporter = TracingReporter;
    let run = simulate_bias_baseline(&ingested.cohort, &options, &mut reporter)
        .context("simulate bias baseline")?;
    if run.summary.reassignment.skip_ratio() > HIGH_SKIP_RATIO {
        warn!(
            skipped = run.summary.reassignment.skipped(),
            eligible_donors = run.summary.reassignment.eligible_donors,
            "many dose sequences found no surviving recipient"
        );
    }

    let indexer = DayIndexer::new(options.epoch);
    write_cohort_csv(&args.io.output, &run.cohort, &indexer)
        .with_context(|| format!("write {}", args.io.output.display()))?;
    if let Some(path) = &args.summary_json {
        write_simulation_summary_json(
            path,
            &args.io.input,
            &args.io.output,
            &options,
            &run.summary,
        )
        .with_context(|| format!("write {}", path.display()))?;
    }
    info!(duration_ms = start.elapsed().as_millis(), "simulation complete");

    Ok(SimulateResult {
        input: args.io.input.clone(),
        output: args.io.output.clone(),
        summary_json: args.summary_json.clone(),
        ingest: ingested.stats,
        summary: run.summary,
    })
}

pub fn run_export_age(args: &ExportAgeArgs) -> Result<ExportAgeResult> {
    let span = info_span!("export_age", age = args.age);
    let _guard = span.enter();
    let ingested = load_cohort(&args.io.input, args.io.epoch)?;
    let selected = filter_by_age(&ingested.cohort, args.reference_year, args.age);
    if selected.is_empty() {
        warn!(age = args.age, reference_year = args.reference_year, "no individual of this age");
    }
    let indexer = DayIndexer::new(args.io.epoch);
    write_cohort_csv(&args.io.output, &selected, &indexer)
        .with_context(|| format!("write {}", args.io.output.display()))?;
    Ok(ExportAgeResult {
        input: args.io.input.clone(),
        output: args.io.output.clone(),
        age: args.age,
        reference_year: args.reference_year,
        source_rows: ingested.cohort.len(),
        exported_rows: selected.len(),
        exported_deaths: selected.death_count(),
    })
}

pub fn analysis_options(args: &IntervalsArgs) -> AnalysisOptions {
    AnalysisOptions {
        epoch: args.io.epoch,
        reference_year: args.reference_year,
        max_age: args.max_age,
        lag_days: args.lag_days,
        fallback_end_day: args.fallback_end_day,
    }
}

pub fn run_intervals(args: &IntervalsArgs) -> Result<IntervalsResult> {
    let span = info_span!("intervals", lag_days = args.lag_days);
    let _guard = span.enter();
    let options = analysis_options(args);
    options.validate().context("invalid analysis options")?;
    let ingested = load_cohort(&args.io.input, options.epoch)?;
    let layout = build_exposure_intervals(&ingested.cohort, &options);
    write_intervals_csv(&args.io.output, &layout)
        .with_context(|| format!("write {}", args.io.output.display()))?;
    Ok(IntervalsResult {
        input: args.io.input.clone(),
        output: args.io.output.clone(),
        end_measure: layout.end_measure,
        excluded: layout.excluded,
        intervals: layout.intervals.len(),
        events: [layout.events(false), layout.events(true)],
        person_days: [layout.person_days(false), layout.person_days(true)],
    })
}

pub fn run_dose_counts(args: &DoseCountsArgs) -> Result<DoseCountsResult> {
    let span = info_span!("dose_counts");
    let _guard = span.enter();
    let ingested = load_cohort(&args.io.input, args.io.epoch)?;
    let end_day = observation_window(&ingested.cohort, args.fallback_end_day);
    let counts = daily_dose_counts(&ingested.cohort, end_day);
    let indexer = DayIndexer::new(args.io.epoch);
    write_dose_counts_csv(&args.io.output, &counts, &indexer)
        .with_context(|| format!("write {}", args.io.output.display()))?;
    Ok(DoseCountsResult {
        input: args.io.input.clone(),
        output: args.io.output.clone(),
        days: counts.days(),
        first_doses: counts.first_doses.iter().sum(),
        all_doses: counts.all_doses.iter().sum(),
        vaccination_start: counts
            .vaccination_start_day()
            .and_then(|day| indexer.date(day)),
    })
}
