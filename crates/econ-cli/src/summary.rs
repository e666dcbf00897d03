use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use econ_common::format_numeric;
use econ_compare::{ComparisonView, CountryView, DatasetStats, IndexPoint, IndexedSeries};
use econ_model::{CountryCode, NormalizationReport, SourceOutcome};
use econ_standards::CountryRegistry;

use crate::types::RunResult;

pub fn print_run_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    match &result.written {
        Some(run) => {
            println!("Dataset: {}", run.dataset_path.display());
            println!("Manifest: {}", run.manifest_path.display());
            println!("Checksum: {}", run.checksum_sha256);
        }
        None => println!("Dry run: nothing written"),
    }
    println!("Reference year: {}", result.reference_year);
    print_stats(&result.stats);
    print_diagnostics(&result.report);
}

pub fn print_stats(stats: &DatasetStats) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Indicator"),
        header_cell("Records"),
        header_cell("Countries"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in indicator_rows(stats) {
        table.add_row(vec![
            Cell::new(&row[0]).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(&row[1]),
            Cell::new(&row[2]),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.records).add_attribute(Attribute::Bold),
        Cell::new(stats.countries).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if let Some((first, last)) = stats.year_range {
        println!("Years: {first}-{last}");
    }
}

fn print_diagnostics(report: &NormalizationReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Diagnostic"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, value) in diagnostic_rows(report) {
        let value_cell = if value == "0" {
            dim_cell(value)
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(label), value_cell]);
    }
    println!();
    println!("Diagnostics:");
    println!("{table}");

    let unavailable = report.unavailable_sources();
    if !unavailable.is_empty() {
        eprintln!("Unavailable sources:");
        for source in unavailable {
            if let Some(SourceOutcome::Unavailable { reason }) = report.sources.get(&source) {
                eprintln!("- {source}: {reason}");
            }
        }
    }
}

pub fn print_country_view(view: &CountryView, countries: &CountryRegistry) {
    let name = countries.name(view.country).unwrap_or_default();
    println!("{} ({name})", view.country);
    println!("{}", base_year_line(view.base_year));
    let series: Vec<(String, &[IndexPoint])> = view
        .series
        .iter()
        .map(|s| (s.key.label().to_string(), s.points.as_slice()))
        .collect();
    print_series_table("Indicator", &series);
    if !view.missing.is_empty() {
        let labels: Vec<&str> = view.missing.iter().map(|i| i.label()).collect();
        println!("No data for: {}", labels.join(", "));
    }
}

pub fn print_comparison_view(view: &ComparisonView, countries: &CountryRegistry) {
    println!("{}", view.indicator.label());
    println!("{}", base_year_line(view.base_year));
    let series: Vec<(String, &[IndexPoint])> = view
        .series
        .iter()
        .map(|s| (country_label(s, countries), s.points.as_slice()))
        .collect();
    print_series_table("Country", &series);
    if !view.missing.is_empty() {
        let labels: Vec<String> = view
            .missing
            .iter()
            .map(|code| code_with_name(*code, countries))
            .collect();
        println!("No {} data for: {}", view.indicator.label(), labels.join(", "));
    }
}

fn print_series_table(key_header: &str, series: &[(String, &[IndexPoint])]) {
    if series.is_empty() {
        println!("No data for the selected filters.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(key_header),
        header_cell("Year"),
        header_cell("Value"),
        header_cell("Index"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (label, points) in series {
        for point in *points {
            let index_cell = match point.index {
                Some(index) if index == 100.0 => Cell::new(index_text(point.index))
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
                Some(_) => Cell::new(index_text(point.index)),
                None => dim_cell(index_text(None)),
            };
            table.add_row(vec![
                Cell::new(label),
                Cell::new(point.year),
                Cell::new(format_numeric(point.value)),
                index_cell,
            ]);
        }
    }
    println!("{table}");
}

/// `(indicator label, records, countries)` per indicator present.
pub fn indicator_rows(stats: &DatasetStats) -> Vec<[String; 3]> {
    stats
        .indicators
        .iter()
        .map(|s| {
            [
                s.indicator.label().to_string(),
                s.records.to_string(),
                s.countries.to_string(),
            ]
        })
        .collect()
}

/// Label/value pairs describing what the run dropped or adjusted.
pub fn diagnostic_rows(report: &NormalizationReport) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for (source, outcome) in &report.sources {
        let value = match outcome {
            SourceOutcome::Loaded { records } => records.to_string(),
            SourceOutcome::Unavailable { .. } => "unavailable".to_string(),
        };
        rows.push((format!("{source} records"), value));
    }
    for (source, reasons) in &report.dropped {
        for (reason, count) in reasons {
            rows.push((format!("{source} dropped ({reason})"), count.to_string()));
        }
    }
    rows.push((
        "unresolved identifiers".to_string(),
        format!("{} ({} distinct)", report.unresolved_records, report.unresolved.len()),
    ));
    rows.push((
        "unresolved exchange rates".to_string(),
        report.unresolved_rates.to_string(),
    ));
    rows.push(("merged duplicates".to_string(), report.merged_records.to_string()));
    rows.push(("pruned wage series".to_string(), report.pruned.len().to_string()));
    rows.push((
        "series without reference year".to_string(),
        report.series_without_reference.to_string(),
    ));
    rows.push((
        "records without USD value".to_string(),
        report.records_without_usd.to_string(),
    ));
    rows
}

pub fn base_year_line(base_year: Option<i32>) -> String {
    match base_year {
        Some(year) => format!("Base year: {year} = 100"),
        None => "Base year: none (no year shared by every series)".to_string(),
    }
}

fn index_text(index: Option<f64>) -> String {
    index.map_or_else(|| "-".to_string(), |value| format!("{value:.2}"))
}

fn country_label(series: &IndexedSeries<CountryCode>, countries: &CountryRegistry) -> String {
    code_with_name(series.key, countries)
}

fn code_with_name(code: CountryCode, countries: &CountryRegistry) -> String {
    match countries.name(code) {
        Some(name) => format!("{code} ({name})"),
        None => code.to_string(),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(100);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
