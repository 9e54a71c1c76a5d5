//! Integration tests for the pipeline module.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use tempfile::TempDir;

use roster_cli::pipeline::{resolve_field_map, run_pipeline};
use roster_ingest::{CacheDirSource, MEMBERS_CACHE_FILE, revisions_cache_file};
use roster_model::{
    ChangeLogEntry, DeparturePrecision, FieldId, FieldOverrides, MemberId, RecordSource,
    Resolution, RunOptions,
};
use roster_report::series_csv_string;

const JOIN_FIELD: i64 = 11;
const STATUS_FIELD: i64 = 12;
const NAME_FIELD: i64 = 13;

fn member(item_id: i64, name: &str, joined: &str, status: (i64, &str)) -> Value {
    json!({
        "item_id": item_id,
        "created_on": joined,
        "fields": [
            {"field_id": NAME_FIELD, "type": "text", "label": "Vorname", "values": [{"value": name}]},
            {"field_id": JOIN_FIELD, "type": "date", "label": "Beginn der Mitgliedschaft",
             "values": [{"start": joined}]},
            {"field_id": STATUS_FIELD, "type": "category", "label": "Status",
             "values": [{"value": {"id": status.0, "text": status.1}}]}
        ]
    })
}

fn revision(revision: i64, created_on: &str, fields: Value) -> Value {
    json!({"revision": revision, "created_on": created_on, "data": {"fields": fields}})
}

fn status_change(old: (i64, &str), new: (i64, &str)) -> Value {
    json!([{
        "field_id": STATUS_FIELD,
        "old_values": [{"value": {"id": old.0, "text": old.1}}],
        "values": [{"value": {"id": new.0, "text": new.1}}]
    }])
}

fn write_json(dir: &Path, name: &str, value: &Value) {
    fs::write(dir.join(name), value.to_string()).expect("write cache file");
}

/// Ada stays, Bob leaves with a recorded status change, Cy has departed
/// without one.
fn cache_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_json(
        dir.path(),
        MEMBERS_CACHE_FILE,
        &json!([
            member(1, "Ada", "2023-01-15 00:00:00", (1, "aktiv")),
            member(2, "Bob", "2023-02-10 00:00:00", (2, "ausgetreten")),
            member(3, "Cy", "2023-03-01 00:00:00", (3, "Ex-Mitglied")),
        ]),
    );
    write_json(
        dir.path(),
        &revisions_cache_file(2),
        &json!([
            revision(3, "2023-04-20 08:15:00", status_change((1, "aktiv"), (2, "ausgetreten"))),
            revision(2, "2023-03-02 10:00:00", json!([])),
            revision(1, "2023-02-10 09:00:00", json!([])),
        ]),
    );
    write_json(
        dir.path(),
        &revisions_cache_file(3),
        &json!([
            revision(2, "2023-03-20 18:00:00", json!([{
                "field_id": NAME_FIELD,
                "old_values": [{"value": "C."}],
                "values": [{"value": "Cy"}]
            }])),
            revision(1, "2023-03-01 09:00:00", json!([])),
        ]),
    );
    dir
}

fn as_of() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 5, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn cache_directory_to_monthly_series() {
    let dir = cache_dir();
    let source = CacheDirSource::open(dir.path()).unwrap();
    let records = source.fetch_all_members().unwrap();

    let output = run_pipeline(&records, &source, &RunOptions::default(), as_of());

    assert_eq!(output.field_map.join_date.id, FieldId(JOIN_FIELD));
    assert_eq!(output.field_map.status.id, FieldId(STATUS_FIELD));
    assert_eq!(output.field_map.name.id, FieldId(NAME_FIELD));

    assert_eq!(output.departures.departed_members, 2);
    assert_eq!(output.departures.exact, 1);
    assert_eq!(output.departures.approximate, 1);
    assert_eq!(output.departures.unresolved, 0);

    let bob = output.members.iter().find(|m| m.id == 2).unwrap();
    let departure = bob.departure.unwrap();
    assert_eq!(departure.precision, DeparturePrecision::Exact);
    assert_eq!(
        departure.date,
        NaiveDate::from_ymd_opt(2023, 4, 20)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    );
    let cy = output.members.iter().find(|m| m.id == 3).unwrap();
    assert!(cy.departure.unwrap().is_approximate());
    assert!(output.anomalies.is_empty());

    let csv = series_csv_string(&output.buckets).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r"
    month,active_members,total_joined,total_left
    2023-01,1,1,0
    2023-02,2,2,0
    2023-03,2,3,1
    2023-04,1,3,2
    2023-05,1,3,2
    2023-06,1,3,2
    ");

    let summary = output.summary.unwrap();
    assert_eq!(summary.current_active, 1);
    assert_eq!(summary.peak_active, 2);
    assert_eq!(summary.peak_month, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
}

#[test]
fn missing_histories_leave_departures_unresolved() {
    let dir = cache_dir();
    let source = CacheDirSource::open(dir.path()).unwrap();
    let records = source.fetch_all_members().unwrap();
    let no_history = |_: MemberId| -> Vec<ChangeLogEntry> { Vec::new() };

    let output = run_pipeline(&records, &no_history, &RunOptions::default(), as_of());

    assert_eq!(output.departures.departed_members, 2);
    assert_eq!(output.departures.unresolved, 2);
    let last = output.buckets.last().unwrap();
    assert_eq!(last.active_members, 3);
    assert_eq!(last.total_left, 0);
}

#[test]
fn explicit_field_ids_take_precedence() {
    let dir = cache_dir();
    let source = CacheDirSource::open(dir.path()).unwrap();
    let records = source.fetch_all_members().unwrap();
    let options = RunOptions {
        overrides: FieldOverrides {
            status: Some(FieldId(99)),
            ..FieldOverrides::default()
        },
        ..RunOptions::default()
    };

    let field_map = resolve_field_map(&records, &options);

    assert_eq!(field_map.status.id, FieldId(99));
    assert_eq!(field_map.status.resolution, Resolution::Override);
    assert!(matches!(
        field_map.join_date.resolution,
        Resolution::Inferred { .. }
    ));
}

#[test]
fn records_without_join_dates_produce_no_series() {
    let dir = TempDir::new().unwrap();
    write_json(
        dir.path(),
        MEMBERS_CACHE_FILE,
        &json!([{"item_id": 1, "fields": []}, {"item_id": 2, "fields": []}]),
    );
    let source = CacheDirSource::open(dir.path()).unwrap();
    let records = source.fetch_all_members().unwrap();

    let output = run_pipeline(&records, &source, &RunOptions::default(), as_of());

    assert_eq!(output.members.len(), 2);
    assert!(output.buckets.is_empty());
    assert!(output.summary.is_none());
}
