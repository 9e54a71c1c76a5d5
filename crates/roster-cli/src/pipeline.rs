//! Pipeline stages from raw records to the monthly series.
//!
//! Each stage runs inside its own span and logs its duration, so a JSON log
//! of a run shows where time went.

use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{debug, info, info_span};

use roster_map::resolve_fields;
use roster_model::{
    ChangeLogSource, FieldMap, Member, MonthlyBucket, RawRecord, RunOptions,
};
use roster_report::{SeriesSummary, aggregate_monthly_as_of};
use roster_transform::{
    DateAnomaly, DepartureReport, StatusDistribution, check_member_dates, normalize,
    resolve_departures,
};

use crate::logging::redact_value;

/// Everything a run produced, for printing and export.
#[derive(Debug)]
pub struct PipelineOutput {
    pub field_map: FieldMap,
    pub members: Vec<Member>,
    pub statuses: StatusDistribution,
    pub departures: DepartureReport,
    pub anomalies: Vec<DateAnomaly>,
    pub buckets: Vec<MonthlyBucket>,
    pub summary: Option<SeriesSummary>,
}

/// Resolves field roles and applies explicit identifiers on top.
pub fn resolve_field_map(records: &[RawRecord], options: &RunOptions) -> FieldMap {
    let span = info_span!("resolve_fields", sample_size = options.resolver.sample_size);
    let _guard = span.enter();
    let start = Instant::now();
    let field_map = resolve_fields(records, &options.resolver).with_overrides(&options.overrides);
    info!(
        join_field = %field_map.join_date.id,
        status_field = %field_map.status.id,
        name_field = %field_map.name.id,
        duration_ms = start.elapsed().as_millis(),
        "field roles resolved"
    );
    field_map
}

/// Runs field resolution, normalization, departure resolution and
/// aggregation over already fetched records.
pub fn run_pipeline<S>(
    records: &[RawRecord],
    changes: &S,
    options: &RunOptions,
    as_of: NaiveDateTime,
) -> PipelineOutput
where
    S: ChangeLogSource + ?Sized,
{
    // =========================================================================
    // Stage 1: Field roles
    // =========================================================================
    let field_map = resolve_field_map(records, options);

    // =========================================================================
    // Stage 2: Normalize records into members
    // =========================================================================
    let normalize_span = info_span!("normalize", record_count = records.len());
    let normalize_start = Instant::now();
    let members = normalize_span.in_scope(|| normalize(records, &field_map));
    let statuses = StatusDistribution::from_members(&members);
    info!(
        member_count = members.len(),
        status_count = statuses.len(),
        duration_ms = normalize_start.elapsed().as_millis(),
        "normalize complete"
    );

    // =========================================================================
    // Stage 3: Departures
    // =========================================================================
    let departure_span = info_span!("departures");
    let departure_start = Instant::now();
    let (members, departures) = departure_span
        .in_scope(|| resolve_departures(&members, changes, &field_map, options.departure));
    for member in members.iter().filter(|m| m.departure.is_some()) {
        debug!(
            member_id = member.id,
            name = redact_value(member.display_name()),
            leave_date = ?member.leave_date(),
            "member departed"
        );
    }
    info!(
        departed_members = departures.departed_members,
        resolved = departures.resolved(),
        duration_ms = departure_start.elapsed().as_millis(),
        "departures complete"
    );
    let anomalies = check_member_dates(&members);

    // =========================================================================
    // Stage 4: Monthly aggregation
    // =========================================================================
    let aggregate_span = info_span!("aggregate", as_of = %as_of);
    let aggregate_start = Instant::now();
    let buckets = aggregate_span.in_scope(|| aggregate_monthly_as_of(&members, as_of));
    let summary = SeriesSummary::from_buckets(&buckets);
    info!(
        bucket_count = buckets.len(),
        duration_ms = aggregate_start.elapsed().as_millis(),
        "aggregate complete"
    );

    PipelineOutput {
        field_map,
        members,
        statuses,
        departures,
        anomalies,
        buckets,
        summary,
    }
}
