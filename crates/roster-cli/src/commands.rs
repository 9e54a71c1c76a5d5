use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::{NaiveTime, Utc};
use comfy_table::{Cell, Table};
use tracing::{info, info_span, warn};

use roster_cli::pipeline::{resolve_field_map, run_pipeline};
use roster_ingest::{CacheDirSource, list_cached_change_logs};
use roster_map::classify_label;
use roster_model::{
    DepartureDetection, FieldId, FieldOverrides, RawRecord, RecordSource, ResolverOptions,
    RunOptions,
};
use roster_report::write_series_csv_file;

use crate::cli::{FieldIdArgs, FieldsArgs, ReportArgs};
use crate::progress::ChangeLogProgress;
use crate::summary::{apply_table_style, dim_cell, header_cell, print_field_map};
use crate::types::ReportResult;

pub fn run_report(args: &ReportArgs, show_progress: bool) -> Result<ReportResult> {
    let report_span = info_span!("report", cache_dir = %args.cache_dir.display());
    let _report_guard = report_span.enter();

    // =========================================================================
    // Stage 0: Ingest cached records
    // =========================================================================
    let ingest_start = Instant::now();
    let (source, records) = load_records(&args.cache_dir)?;
    let cached_change_logs = list_cached_change_logs(source.dir())
        .context("list revision caches")?
        .len();
    info!(
        record_count = records.len(),
        cached_change_logs,
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let options = run_options(args.sample_size, &args.fields, args.departed_option_id);
    let as_of = args.as_of.map_or_else(
        || Utc::now().naive_utc(),
        |date| date.and_time(NaiveTime::MIN),
    );

    // =========================================================================
    // Stages 1-4: Fields, members, departures, monthly series
    // =========================================================================
    let changes = ChangeLogProgress::new(&source, show_progress);
    let pipeline = run_pipeline(&records, &changes, &options, as_of);
    changes.finish();

    // =========================================================================
    // Stage 5: Output
    // =========================================================================
    let output = if pipeline.buckets.is_empty() {
        warn!("no member has a join date; series is empty and no csv is written");
        None
    } else if args.dry_run {
        info!(path = %args.output.display(), "dry run; csv not written");
        None
    } else {
        let write_start = Instant::now();
        write_series_csv_file(&args.output, &pipeline.buckets).context("write series csv")?;
        info!(
            path = %args.output.display(),
            rows = pipeline.buckets.len(),
            duration_ms = write_start.elapsed().as_millis(),
            "series written"
        );
        Some(args.output.clone())
    };

    Ok(ReportResult {
        cache_dir: args.cache_dir.clone(),
        record_count: records.len(),
        cached_change_logs,
        output,
        dry_run: args.dry_run,
        pipeline,
    })
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let (source, records) = load_records(&args.cache_dir)?;
    let Some(first) = records.first() else {
        bail!("{} holds no records", source.members_path().display());
    };
    print_record_fields(first);

    let options = run_options(args.sample_size, &args.fields, None);
    let field_map = resolve_field_map(&records, &options);
    print_field_map(&field_map);
    Ok(())
}

fn load_records(cache_dir: &Path) -> Result<(CacheDirSource, Vec<RawRecord>)> {
    let source = CacheDirSource::open(cache_dir).context("open cache directory")?;
    let records = source.fetch_all_members().context("read member cache")?;
    Ok((source, records))
}

fn run_options(
    sample_size: usize,
    fields: &FieldIdArgs,
    departed_option_id: Option<i64>,
) -> RunOptions {
    RunOptions {
        resolver: ResolverOptions { sample_size },
        overrides: FieldOverrides {
            join_date: fields.join_field.map(FieldId),
            status: fields.status_field.map(FieldId),
            name: fields.name_field.map(FieldId),
        },
        departure: departed_option_id
            .map_or(DepartureDetection::Lexical, DepartureDetection::OptionId),
    }
}

fn print_record_fields(record: &RawRecord) {
    println!("Record: {}", record.item_id);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field ID"),
        header_cell("Type"),
        header_cell("Label"),
        header_cell("Suggested role"),
    ]);
    apply_table_style(&mut table);
    for field in &record.fields {
        let label = field.label.as_deref().unwrap_or_default();
        let role = match classify_label(label) {
            Some(role) => Cell::new(role),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(field.field_id),
            Cell::new(field.field_type.as_str()),
            Cell::new(label),
            role,
        ]);
    }
    println!("{table}");
}
