use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_model::{FieldMap, FieldRole, MonthlyBucket, Resolution};
use roster_report::SeriesSummary;
use roster_transform::{DateAnomaly, DepartureReport, StatusDistribution};

use crate::types::ReportResult;

/// Months shown in the terminal series table; the CSV holds all of them.
const RECENT_MONTHS: usize = 12;

pub fn print_summary(result: &ReportResult) {
    let pipeline = &result.pipeline;
    println!("Cache: {}", result.cache_dir.display());
    println!(
        "Records: {} ({} cached change logs)",
        result.record_count, result.cached_change_logs
    );
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None if result.dry_run => println!("Output: dry run, nothing written"),
        None => {}
    }

    print_field_map(&pipeline.field_map);
    print_status_table(&pipeline.statuses, &pipeline.departures);
    print_anomalies(&pipeline.anomalies);

    let Some(summary) = &pipeline.summary else {
        println!("No member has a join date; no monthly series was produced.");
        return;
    };
    print_series_table(&pipeline.buckets);
    print_headline(summary);
}

pub fn print_field_map(field_map: &FieldMap) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Field ID"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for role in FieldRole::ALL {
        let resolved = field_map.get(role);
        let source = match &resolved.resolution {
            Resolution::Inferred { label } => Cell::new(format!("label \"{label}\"")),
            Resolution::Override => Cell::new("explicit").fg(Color::Green),
            Resolution::Default => Cell::new("default").fg(Color::Yellow),
        };
        table.add_row(vec![Cell::new(role), Cell::new(resolved.id), source]);
    }
    println!("{table}");
}

fn print_status_table(statuses: &StatusDistribution, departures: &DepartureReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Members")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (status, count) in statuses.iter() {
        table.add_row(vec![Cell::new(status), Cell::new(count)]);
    }
    if statuses.is_empty() {
        table.add_row(vec![dim_cell("no status values"), dim_cell("-")]);
    }
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Departed statuses"),
        header_cell("Departed"),
        header_cell("Exact"),
        header_cell("Approximate"),
        header_cell("Unresolved"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(&departures.departed_statuses),
        Cell::new(departures.departed_members),
        Cell::new(departures.exact),
        count_cell(departures.approximate, Color::Yellow),
        count_cell(departures.unresolved, Color::Red),
    ]);
    println!("{table}");
}

fn print_anomalies(anomalies: &[DateAnomaly]) {
    if anomalies.is_empty() {
        return;
    }
    eprintln!("Date anomalies:");
    for anomaly in anomalies {
        eprintln!(
            "- member {}: {} (leave {})",
            anomaly.member_id,
            anomaly.kind,
            anomaly.leave_date.format("%Y-%m-%d")
        );
    }
}

fn print_series_table(buckets: &[MonthlyBucket]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Month"),
        header_cell("Active"),
        header_cell("Joined"),
        header_cell("Left"),
    ]);
    apply_series_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let skip = buckets.len().saturating_sub(RECENT_MONTHS);
    if skip > 0 {
        table.add_row(vec![
            dim_cell(format!("{skip} earlier months")),
            dim_cell("..."),
            dim_cell("..."),
            dim_cell("..."),
        ]);
    }
    for bucket in &buckets[skip..] {
        table.add_row(vec![
            Cell::new(bucket.month_label()),
            Cell::new(bucket.active_members).add_attribute(Attribute::Bold),
            Cell::new(bucket.total_joined),
            Cell::new(bucket.total_left),
        ]);
    }
    println!("{table}");
}

fn print_headline(summary: &SeriesSummary) {
    println!(
        "Months: {} ({} to {})",
        summary.months,
        summary.first_month.format("%Y-%m"),
        summary.last_month.format("%Y-%m")
    );
    println!("Current active members: {}", summary.current_active);
    println!(
        "Peak active members: {} ({})",
        summary.peak_active,
        summary.peak_month.format("%Y-%m")
    );
    println!("Average active members: {:.1}", summary.average_active);
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_series_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
