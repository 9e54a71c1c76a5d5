//! Tests for roster-model types.

use chrono::NaiveDate;
use roster_model::{
    ChangeLogEntry, DEFAULT_JOIN_DATE_FIELD, DEFAULT_NAME_FIELD, DEFAULT_STATUS_FIELD,
    FieldId, FieldMap, FieldOverrides, FieldRole, FieldType, ModelError, MonthlyBucket,
    RawRecord, Resolution, ValuePayload,
};

const RECORDS_JSON: &str = r#"[
  {
    "item_id": 101,
    "created_on": "2021-03-04 10:00:00",
    "fields": [
      {"field_id": 1, "type": "date", "label": "Beginn Mitgliedschaft",
       "values": [{"start": "2021-03-01 00:00:00", "start_date": "2021-03-01"}]},
      {"field_id": 2, "type": "category", "label": "Status",
       "values": [{"value": {"id": 3, "text": "aktiv", "color": "DCEBD8"}}]},
      {"field_id": 3, "type": "text", "label": "Vorname", "values": [{"value": "Ada"}]},
      {"field_id": 4, "type": "email", "label": "E-Mail", "values": []}
    ]
  },
  {"item_id": 102}
]"#;

#[test]
fn parses_records_with_unknown_field_types() {
    let records = RawRecord::list_from_json(RECORDS_JSON).expect("parse records");
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.item_id, 101);
    assert_eq!(first.fields.len(), 4);
    assert_eq!(first.fields[3].field_type, FieldType::Other);

    let status = first.field(FieldId(2)).expect("status field");
    assert_eq!(status.field_type, FieldType::Category);
    assert_eq!(
        status.first_value(),
        Some(ValuePayload::Option {
            id: Some(3),
            text: "aktiv".to_string()
        })
    );

    let bare = &records[1];
    assert!(bare.created_on.is_none());
    assert!(bare.fields.is_empty());
}

#[test]
fn malformed_records_are_reported() {
    let error = RawRecord::list_from_json("{not json").expect_err("must fail");
    assert!(matches!(error, ModelError::Json(_)));
}

#[test]
fn parses_change_log_entries() {
    let json = r#"[
      {"revision": 3, "created_on": "2023-04-20 08:15:00",
       "data": {"fields": [
         {"field_id": 216758721,
          "old_values": [{"value": {"id": 1, "text": "aktiv"}}],
          "values": [{"value": {"id": 4, "text": "ausgetreten"}}]}
       ]}},
      {"revision": 2, "created_on": "2023-01-01 00:00:00", "data": null},
      {"revision": 1, "created_on": "2022-12-01 00:00:00"}
    ]"#;
    let entries = ChangeLogEntry::list_from_json(json).expect("parse revisions");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].revision, Some(3));

    let delta = entries[0]
        .deltas_for(DEFAULT_STATUS_FIELD)
        .next()
        .expect("status delta");
    assert!(delta.has_both_sides());
    assert_eq!(
        delta.new_value().as_ref().and_then(ValuePayload::display_text),
        Some("ausgetreten")
    );
    assert!(entries[1].deltas.is_empty());
    assert!(entries[2].deltas.is_empty());
}

#[test]
fn null_value_lists_read_as_empty() {
    let json = r#"[
      {"revision": 2, "created_on": "2023-04-20 08:15:00",
       "data": {"fields": [
         {"field_id": 216758721, "old_values": null,
          "values": [{"value": {"id": 4, "text": "ausgetreten"}}]},
         {"field_id": 1, "old_values": [{"value": "a"}], "values": null}
       ]}},
      {"revision": 1, "created_on": "2023-01-01 00:00:00", "data": {"fields": null}}
    ]"#;
    let entries = ChangeLogEntry::list_from_json(json).expect("parse revisions");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].deltas.len(), 2);
    assert!(entries[0].deltas.iter().all(|delta| !delta.has_both_sides()));
    assert!(entries[0].deltas[0].old_values.is_empty());
    assert!(entries[0].deltas[1].new_values.is_empty());
    assert!(entries[1].deltas.is_empty());
}

#[test]
fn change_log_serializes_in_record_system_shape() {
    let entries = ChangeLogEntry::list_from_json(
        r#"[{"revision": 1, "created_on": "2023-01-01 00:00:00",
             "data": {"fields": [{"field_id": 7, "values": [{"value": "x"}]}]}}]"#,
    )
    .expect("parse");
    let json = serde_json::to_value(&entries).expect("serialize");
    assert_eq!(json[0]["data"]["fields"][0]["field_id"], 7);
    assert_eq!(json[0]["data"]["fields"][0]["values"][0]["value"], "x");
}

#[test]
fn field_map_defaults_and_role_lookup() {
    let map = FieldMap::default();
    assert_eq!(map.id(FieldRole::JoinDate), DEFAULT_JOIN_DATE_FIELD);
    assert_eq!(map.id(FieldRole::Status), DEFAULT_STATUS_FIELD);
    assert_eq!(map.id(FieldRole::Name), DEFAULT_NAME_FIELD);
    assert!(map.status.resolution.is_default());

    assert_eq!(map.role_of(DEFAULT_STATUS_FIELD), Some(FieldRole::Status));
    assert_eq!(map.role_of(FieldId(1)), None);
}

#[test]
fn field_map_overrides_replace_identifiers() {
    let overrides = FieldOverrides {
        status: Some(FieldId(42)),
        ..FieldOverrides::default()
    };
    let map = FieldMap::default().with_overrides(&overrides);
    assert_eq!(map.status.id, FieldId(42));
    assert_eq!(map.status.resolution, Resolution::Override);
    assert_eq!(map.join_date.id, DEFAULT_JOIN_DATE_FIELD);
}

#[test]
fn colliding_identifiers_prefer_join_date() {
    let overrides = FieldOverrides {
        join_date: Some(FieldId(9)),
        status: Some(FieldId(9)),
        name: None,
    };
    let map = FieldMap::default().with_overrides(&overrides);
    assert_eq!(map.role_of(FieldId(9)), Some(FieldRole::JoinDate));
}

#[test]
fn buckets_must_be_month_anchored() {
    let anchored = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
    let bucket = MonthlyBucket::new(anchored).expect("anchored bucket");
    assert_eq!(bucket.month_label(), "2023-02");
    assert!(bucket.is_consistent());

    let mid_month = NaiveDate::from_ymd_opt(2023, 2, 14).unwrap();
    assert!(matches!(
        MonthlyBucket::new(mid_month),
        Err(ModelError::MonthNotAnchored(_))
    ));
}

#[test]
fn bucket_consistency_detects_drift() {
    let mut bucket = MonthlyBucket::new(NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()).unwrap();
    bucket.total_joined = 5;
    bucket.total_left = 2;
    bucket.active_members = 4;
    assert!(!bucket.is_consistent());
    assert_eq!(bucket.expected_active(), 3);
}
