//! Record normalization.
//!
//! Converts raw records into [`Member`] entities using a resolved
//! [`FieldMap`]. Fields of an unexpected type, empty fields and unparseable
//! values are skipped; the resulting member simply lacks that attribute.

use std::collections::BTreeMap;

use tracing::{debug, info};

use roster_model::{FieldMap, FieldRole, FieldType, Member, RawField, RawRecord, ValuePayload};

use crate::datetime::parse_timestamp;

/// Builds one member from a raw record.
pub fn normalize_record(record: &RawRecord, fields: &FieldMap) -> Member {
    let mut member = Member::new(record.item_id);

    for field in &record.fields {
        match fields.role_of(field.field_id) {
            Some(FieldRole::JoinDate) => {
                if let Some(join_date) = extract_join_date(record, field) {
                    member.join_date = Some(join_date);
                }
            }
            Some(FieldRole::Status) => {
                if let Some((text, option_id)) = extract_status(field) {
                    member.status = Some(text);
                    member.status_option_id = option_id;
                }
            }
            Some(FieldRole::Name) => {
                if let Some(name) = extract_name(field) {
                    member.name = Some(name);
                }
            }
            None => {}
        }
    }

    member
}

/// Builds members for every record, in input order.
pub fn normalize(records: &[RawRecord], fields: &FieldMap) -> Vec<Member> {
    let members: Vec<Member> = records
        .iter()
        .map(|record| normalize_record(record, fields))
        .collect();

    let with_join_date = members.iter().filter(|m| m.join_date.is_some()).count();
    info!(
        member_count = members.len(),
        with_join_date, "normalized member records"
    );
    for (status, count) in StatusDistribution::from_members(&members).iter() {
        info!(status, count, "status distribution");
    }
    members
}

fn extract_join_date(record: &RawRecord, field: &RawField) -> Option<chrono::NaiveDateTime> {
    if field.field_type != FieldType::Date {
        return None;
    }
    let ValuePayload::Date { start } = field.first_value()? else {
        return None;
    };
    let parsed = parse_timestamp(&start);
    if parsed.is_none() {
        debug!(
            member_id = record.item_id,
            value = %start,
            "unparseable join date"
        );
    }
    parsed
}

fn extract_status(field: &RawField) -> Option<(String, Option<i64>)> {
    if field.field_type != FieldType::Category {
        return None;
    }
    let value = field.first_value()?;
    let text = value.display_text()?.to_string();
    Some((text, value.option_id()))
}

fn extract_name(field: &RawField) -> Option<String> {
    if field.field_type != FieldType::Text {
        return None;
    }
    match field.first_value()? {
        ValuePayload::Scalar(name) => Some(name),
        _ => None,
    }
}

/// Member counts per current status label, sorted by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusDistribution {
    counts: BTreeMap<String, usize>,
}

impl StatusDistribution {
    pub fn from_members(members: &[Member]) -> Self {
        let mut counts = BTreeMap::new();
        for status in members.iter().filter_map(|m| m.status.as_deref()) {
            *counts.entry(status.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts
            .iter()
            .map(|(status, count)| (status.as_str(), *count))
    }

    pub fn get(&self, status: &str) -> usize {
        self.counts.get(status).copied().unwrap_or(0)
    }

    /// Distinct status labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
