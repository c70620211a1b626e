//! End-to-end runs of each subcommand against small cohort files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use drate_cli::cli::{Cli, Command};
use drate_cli::commands::{run_dose_counts, run_export_age, run_intervals, run_simulate};

const HEADER: &str = "Rok_narozeni,DatumUmrti,Datum_1,Datum_2,Datum_3,Datum_4,Datum_5,Datum_6,Datum_7";

/// 200 individuals born 1953 or 1960; every fifth dies, every other one is dosed.
fn write_cohort(dir: &Path) -> PathBuf {
    let mut text = String::from(HEADER);
    text.push('\n');
    for i in 0..200 {
        let birth = if i % 2 == 0 { 1953 } else { 1960 };
        let death = if i % 5 == 0 {
            format!("2022-{:02}-15", 1 + i % 12)
        } else {
            String::new()
        };
        let doses = if i % 2 == 0 {
            "2021-03-01,2021-04-01,,,,,"
        } else {
            ",,,,,,"
        };
        text.push_str(&format!("{birth},{death},{doses}\n"));
    }
    let path = dir.join("cohort.csv");
    fs::write(&path, text).unwrap();
    path
}

fn parse(args: &[&str]) -> Command {
    let mut argv = vec!["drate"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("parse").command
}

#[test]
fn simulate_writes_cohort_and_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_cohort(dir.path());
    let output = dir.path().join("out/synthetic.csv");
    let summary = dir.path().join("out/summary.json");
    let Command::Simulate(args) = parse(&[
        "simulate",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--summary-json",
        summary.to_str().unwrap(),
    ]) else {
        panic!("expected simulate");
    };

    let result = run_simulate(&args).expect("simulate");
    assert_eq!(result.summary.cohort_size, 200);
    assert_eq!(result.summary.real_deaths, 40);
    assert!((result.summary.death_rate - 0.2).abs() < 1e-12);
    let reassignment = result.summary.reassignment;
    assert_eq!(reassignment.eligible_donors, 100);
    assert_eq!(
        reassignment.assigned + reassignment.skipped(),
        reassignment.eligible_donors
    );

    let text = fs::read_to_string(&output).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADER));
    assert_eq!(lines.count(), 200);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(json["options"]["seed"], 42);
    assert_eq!(json["summary"]["cohort_size"], 200);
}

#[test]
fn simulate_is_reproducible_for_a_seed() {
    let dir = TempDir::new().unwrap();
    let input = write_cohort(dir.path());
    let mut outputs = Vec::new();
    for name in ["a.csv", "b.csv"] {
        let output = dir.path().join(name);
        let Command::Simulate(args) = parse(&[
            "simulate",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--seed",
            "7",
        ]) else {
            panic!("expected simulate");
        };
        run_simulate(&args).expect("simulate");
        outputs.push(fs::read_to_string(output).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn simulate_reports_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");
    let Command::Simulate(args) = parse(&[
        "simulate",
        dir.path().join("absent.csv").to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]) else {
        panic!("expected simulate");
    };
    let error = run_simulate(&args).unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
    assert!(!output.exists());
}

#[test]
fn export_age_keeps_one_birth_year() {
    let dir = TempDir::new().unwrap();
    let input = write_cohort(dir.path());
    let output = dir.path().join("age70.csv");
    let Command::ExportAge(args) = parse(&[
        "export-age",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]) else {
        panic!("expected export-age");
    };
    let result = run_export_age(&args).expect("export");
    assert_eq!(result.source_rows, 200);
    assert_eq!(result.exported_rows, 100);
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.lines().skip(1).all(|line| line.starts_with("1953,")));
}

#[test]
fn intervals_split_dosed_follow_up() {
    let dir = TempDir::new().unwrap();
    let input = write_cohort(dir.path());
    let output = dir.path().join("intervals.csv");
    let Command::Intervals(args) = parse(&[
        "intervals",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--lag-days",
        "14",
    ]) else {
        panic!("expected intervals");
    };
    let result = run_intervals(&args).expect("intervals");
    assert_eq!(result.excluded, 0);
    // 100 undosed rows give one interval; 100 dosed rows give two.
    assert_eq!(result.intervals, 300);
    assert_eq!(result.events[0] + result.events[1], 40);
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("id,start,stop,event,vaccinated,duration\n"));
}

#[test]
fn dose_counts_find_vaccination_start() {
    let dir = TempDir::new().unwrap();
    let input = write_cohort(dir.path());
    let output = dir.path().join("doses.csv");
    let Command::DoseCounts(args) = parse(&[
        "dose-counts",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]) else {
        panic!("expected dose-counts");
    };
    let result = run_dose_counts(&args).expect("dose counts");
    assert_eq!(result.first_doses, 100);
    assert_eq!(result.all_doses, 200);
    assert_eq!(
        result.vaccination_start.map(|date| date.to_string()).as_deref(),
        Some("2021-03-01")
    );
}
