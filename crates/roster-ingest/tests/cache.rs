//! Tests for the cache-directory record source.

use std::fs;
use std::path::Path;

use roster_ingest::{CacheDirSource, IngestError, MEMBERS_CACHE_FILE, revisions_cache_file};
use roster_model::{
    ChangeLogSource, DEFAULT_STATUS_FIELD, DepartureDetection, DeparturePrecision, FieldMap,
    Member, RecordSource,
};
use roster_transform::resolve_departures;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write cache file");
}

#[test]
fn reads_members_and_revisions() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        MEMBERS_CACHE_FILE,
        r#"[{"item_id": 1, "fields": []}, {"item_id": 2, "fields": []}]"#,
    );
    write(
        dir.path(),
        &revisions_cache_file(2),
        r#"[{"revision": 1, "created_on": "2023-04-20 08:00:00", "data": {"fields": []}}]"#,
    );

    let source = CacheDirSource::open(dir.path()).unwrap();
    let records = source.fetch_all_members().unwrap();
    assert_eq!(records.len(), 2);

    let history = source.fetch_change_log(2);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].created_on.as_deref(), Some("2023-04-20 08:00:00"));
}

#[test]
fn missing_members_cache_is_an_error() {
    let dir = TempDir::new().unwrap();
    let source = CacheDirSource::open(dir.path()).unwrap();
    let error = source.fetch_all_members().unwrap_err();
    assert!(matches!(error, IngestError::FileNotFound { .. }));
}

#[test]
fn malformed_members_cache_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), MEMBERS_CACHE_FILE, r#"{"items": []}"#);
    let source = CacheDirSource::open(dir.path()).unwrap();
    let error = source.fetch_all_members().unwrap_err();
    assert!(matches!(error, IngestError::Parse { .. }));
}

#[test]
fn missing_or_broken_revisions_yield_empty_history() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), &revisions_cache_file(5), "not json");
    let source = CacheDirSource::open(dir.path()).unwrap();

    assert!(source.fetch_change_log(4).is_empty());
    assert!(source.fetch_change_log(5).is_empty());
    assert!(matches!(
        source.read_change_log(5),
        Err(IngestError::Parse { .. })
    ));
}

#[test]
fn open_rejects_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        CacheDirSource::open(&missing),
        Err(IngestError::DirectoryNotFound { .. })
    ));
}

#[test]
fn null_old_values_keep_history_for_fallback() {
    let dir = TempDir::new().unwrap();
    let revisions = format!(
        r#"[
          {{"revision": 2, "created_on": "2023-06-01 12:00:00",
            "data": {{"fields": [
              {{"field_id": {status}, "old_values": null,
                "values": [{{"value": {{"id": 4, "text": "ausgetreten"}}}}]}}
            ]}}}},
          {{"revision": 1, "created_on": "2023-01-01 00:00:00",
            "data": {{"fields": [{{"field_id": 1, "old_values": null, "values": [{{"value": "x"}}]}}]}}}}
        ]"#,
        status = DEFAULT_STATUS_FIELD
    );
    write(dir.path(), &revisions_cache_file(5), &revisions);
    let source = CacheDirSource::open(dir.path()).unwrap();

    assert_eq!(source.fetch_change_log(5).len(), 2);

    let members = vec![Member::new(5).with_status("ausgetreten")];
    let (resolved, report) = resolve_departures(
        &members,
        &source,
        &FieldMap::default(),
        DepartureDetection::Lexical,
    );
    let departure = resolved[0].departure.expect("approximate departure");
    assert_eq!(departure.precision, DeparturePrecision::Approximate);
    assert_eq!(departure.date.format("%Y-%m-%d").to_string(), "2023-06-01");
    assert_eq!(report.approximate, 1);
    assert_eq!(report.unresolved, 0);
}
