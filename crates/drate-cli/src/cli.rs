//! CLI argument definitions for the bias-baseline simulator.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use drate_model::{
    DEFAULT_FALLBACK_END_DAY, DEFAULT_MAX_AGE, DEFAULT_REFERENCE_YEAR, DEFAULT_RETRIES,
    DEFAULT_SEED, DayIndex,
};

#[derive(Parser)]
#[command(
    name = "drate",
    version,
    about = "Bias-baseline simulator for vaccination and mortality cohorts",
    long_about = "Build a synthetic cohort in which vaccination has no effect on mortality.\n\n\
                  Deaths are redrawn at the cohort's empirical rate and real dose sequences\n\
                  are transplanted onto synthetic individuals who survive past the last dose.\n\
                  Any apparent vaccine effect measured on the output is analysis bias."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the synthetic bias-baseline cohort.
    Simulate(SimulateArgs),

    /// Export the individuals of a single age.
    ExportAge(ExportAgeArgs),

    /// Split follow-up into unvaccinated and vaccinated intervals.
    Intervals(IntervalsArgs),

    /// Count first doses and all doses per day.
    DoseCounts(DoseCountsArgs),
}

/// Options shared by every subcommand that reads a cohort.
#[derive(Args, Clone)]
pub struct InputArgs {
    /// Cohort CSV with Rok_narozeni, DatumUmrti and Datum_1..Datum_7 columns.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination CSV (written atomically).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Date mapped to day 0.
    #[arg(long = "epoch", value_name = "YYYY-MM-DD", default_value = "2020-01-01")]
    pub epoch: NaiveDate,
}

#[derive(Parser)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub io: InputArgs,

    /// Observation window in days when the cohort has no deaths.
    #[arg(long = "fallback-end-day", value_name = "DAYS", default_value_t = DEFAULT_FALLBACK_END_DAY)]
    pub fallback_end_day: DayIndex,

    /// Seed for the death and dose random streams.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum candidates tried per donor dose sequence.
    #[arg(long = "retries", default_value_t = DEFAULT_RETRIES)]
    pub retries: usize,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ExportAgeArgs {
    #[command(flatten)]
    pub io: InputArgs,

    /// Age to keep, computed as reference year minus birth year.
    #[arg(long = "age", default_value_t = 70)]
    pub age: i32,

    /// Year ages are computed against.
    #[arg(long = "reference-year", default_value_t = DEFAULT_REFERENCE_YEAR)]
    pub reference_year: i32,
}

#[derive(Parser)]
pub struct IntervalsArgs {
    #[command(flatten)]
    pub io: InputArgs,

    /// Days after the first dose before follow-up counts as vaccinated.
    #[arg(long = "lag-days", value_name = "DAYS", default_value_t = 0)]
    pub lag_days: DayIndex,

    /// Year ages are computed against.
    #[arg(long = "reference-year", default_value_t = DEFAULT_REFERENCE_YEAR)]
    pub reference_year: i32,

    /// Oldest plausible age; older individuals are excluded.
    #[arg(long = "max-age", default_value_t = DEFAULT_MAX_AGE)]
    pub max_age: i32,

    /// Follow-up length in days when the cohort has no deaths.
    #[arg(long = "fallback-end-day", value_name = "DAYS", default_value_t = DEFAULT_FALLBACK_END_DAY)]
    pub fallback_end_day: DayIndex,
}

#[derive(Parser)]
pub struct DoseCountsArgs {
    #[command(flatten)]
    pub io: InputArgs,

    /// Window length in days when the cohort has no deaths.
    #[arg(long = "fallback-end-day", value_name = "DAYS", default_value_t = DEFAULT_FALLBACK_END_DAY)]
    pub fallback_end_day: DayIndex,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
