use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{DoseCountsResult, ExportAgeResult, IntervalsResult, SimulateResult};

pub fn print_simulate_summary(result: &SimulateResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    if let Some(path) = &result.summary_json {
        println!("Summary JSON: {}", path.display());
    }
    println!("{}", simulate_table(result));
}

/// Headline counters of a simulation run. Assigned and skipped are always shown.
pub fn simulate_table(result: &SimulateResult) -> Table {
    let summary = &result.summary;
    let reassignment = &summary.reassignment;
    let mut table = metric_table();
    add_metric(&mut table, "Cohort size", summary.cohort_size);
    add_metric(&mut table, "Real deaths", summary.real_deaths);
    add_metric(&mut table, "Death rate", format!("{:.6}", summary.death_rate));
    add_metric(
        &mut table,
        "Measurement window (days)",
        summary.end_measure,
    );
    add_metric(&mut table, "Simulated deaths", summary.simulated_deaths);
    add_metric(&mut table, "Eligible donors", reassignment.eligible_donors);
    table.add_row(vec![
        Cell::new("Assigned").add_attribute(Attribute::Bold),
        Cell::new(reassignment.assigned)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Skipped").add_attribute(Attribute::Bold),
        count_cell(reassignment.skipped(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        dim_cell("  -> pool exhausted"),
        count_cell(reassignment.skipped_pool_exhausted, Color::Yellow),
    ]);
    table.add_row(vec![
        dim_cell("  -> no surviving candidate"),
        count_cell(reassignment.skipped_no_candidate, Color::Yellow),
    ]);
    let invalid = result.ingest.invalid_dates + result.ingest.invalid_birth_years;
    if invalid > 0 {
        table.add_row(vec![
            Cell::new("Unparseable input cells"),
            count_cell(invalid, Color::Red),
        ]);
    }
    table
}

pub fn print_export_age_summary(result: &ExportAgeResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    let mut table = metric_table();
    add_metric(&mut table, "Age", result.age);
    add_metric(&mut table, "Reference year", result.reference_year);
    add_metric(&mut table, "Source rows", result.source_rows);
    add_metric(&mut table, "Exported rows", result.exported_rows);
    add_metric(&mut table, "Exported deaths", result.exported_deaths);
    println!("{table}");
}

pub fn print_intervals_summary(result: &IntervalsResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Exposure"),
        header_cell("Events"),
        header_cell("Person-days"),
    ]);
    apply_table_style(&mut table);
    for (label, index) in [("Unvaccinated", 0), ("Vaccinated", 1)] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(result.events[index]),
            Cell::new(format!("{:.1}", result.person_days[index])),
        ]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    println!("{table}");
    println!(
        "{} intervals, follow-up to day {}, {} excluded for missing or implausible age",
        result.intervals, result.end_measure, result.excluded
    );
}

pub fn print_dose_counts_summary(result: &DoseCountsResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    let mut table = metric_table();
    add_metric(&mut table, "Days", result.days);
    add_metric(&mut table, "First doses", result.first_doses);
    add_metric(&mut table, "All doses", result.all_doses);
    let start = result
        .vaccination_start
        .map_or_else(|| "-".to_string(), |date| date.to_string());
    add_metric(&mut table, "Vaccination start", start);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn metric_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

fn add_metric<T: ToString>(table: &mut Table, label: &str, value: T) {
    table.add_row(vec![Cell::new(label), Cell::new(value)]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
