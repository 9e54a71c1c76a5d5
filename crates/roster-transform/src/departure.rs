//! Departure resolution.
//!
//! Members whose current status denotes departure get a leave date from their
//! revision history: the first revision (in delivery order) whose status delta
//! changes the value *into* the member's current status. When no such
//! revision exists, the first delivered revision stands in as an approximate
//! date. Members without any history keep no leave date.
//!
//! Revisions are processed exactly in the order the change log source
//! delivers them (newest first for the record system); they are never
//! re-sorted here.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use roster_model::{
    ChangeLogEntry, ChangeLogSource, Departure, DepartureDetection, FieldId, FieldMap, Member,
    ValuePayload,
};

use crate::datetime::parse_timestamp;
use crate::normalize::StatusDistribution;

/// Lowercase substrings that mark a status label as a departure.
pub const LEAVING_MARKERS: [&str; 6] = ["aus", "exit", "left", "former", "ex-", "inactive"];

/// Departed label used when no status in the population carries a marker.
pub const FALLBACK_DEPARTED_STATUS: &str = "ausgetreten";

/// The set of statuses treated as "departed" for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartureStatuses {
    /// Departed labels, matched exactly against a member's current status.
    Labels(BTreeSet<String>),
    /// One categorical option id.
    OptionId(i64),
}

impl DepartureStatuses {
    /// Derives the departed statuses for a member population.
    pub fn detect(members: &[Member], detection: DepartureDetection) -> Self {
        match detection {
            DepartureDetection::Lexical => Self::lexical(members),
            DepartureDetection::OptionId(id) => Self::OptionId(id),
        }
    }

    /// Collects every distinct status label carrying a leaving marker,
    /// falling back to [`FALLBACK_DEPARTED_STATUS`] when none does.
    pub fn lexical(members: &[Member]) -> Self {
        let distribution = StatusDistribution::from_members(members);
        let mut labels: BTreeSet<String> = distribution
            .labels()
            .filter(|label| has_leaving_marker(label))
            .map(str::to_string)
            .collect();
        if labels.is_empty() {
            labels.insert(FALLBACK_DEPARTED_STATUS.to_string());
        }
        Self::Labels(labels)
    }

    /// Whether the member's current status denotes departure.
    pub fn is_departed(&self, member: &Member) -> bool {
        match self {
            Self::Labels(labels) => member
                .status
                .as_deref()
                .is_some_and(|status| labels.contains(status)),
            Self::OptionId(id) => member.status_option_id == Some(*id),
        }
    }

    /// Whether a decoded new status value moves the member into its current
    /// departed status.
    fn is_transition_into(&self, member: &Member, new_value: &ValuePayload) -> bool {
        if matches!(self, Self::OptionId(id) if new_value.option_id() == Some(*id)) {
            return true;
        }
        match (new_value.display_text(), member.status.as_deref()) {
            (Some(new), Some(current)) => !new.is_empty() && new == current,
            _ => false,
        }
    }

    /// Human-readable description for logs and summaries.
    pub fn describe(&self) -> String {
        match self {
            Self::Labels(labels) => labels.iter().cloned().collect::<Vec<_>>().join(", "),
            Self::OptionId(id) => format!("status option #{id}"),
        }
    }
}

fn has_leaving_marker(label: &str) -> bool {
    let label = label.to_lowercase();
    LEAVING_MARKERS.iter().any(|marker| label.contains(marker))
}

/// Finds a member's departure in its revision history.
pub fn find_departure(
    member: &Member,
    entries: &[ChangeLogEntry],
    status_field: FieldId,
    statuses: &DepartureStatuses,
) -> Option<Departure> {
    for entry in entries {
        for delta in entry.deltas_for(status_field) {
            if !delta.has_both_sides() {
                continue;
            }
            let (Some(old_value), Some(new_value)) = (delta.old_value(), delta.new_value()) else {
                continue;
            };
            if !statuses.is_transition_into(member, &new_value) {
                continue;
            }
            match entry_timestamp(entry) {
                Some(date) => {
                    debug!(
                        member_id = member.id,
                        revision = ?entry.revision,
                        old_status = old_value.display_text().unwrap_or("-"),
                        new_status = new_value.display_text().unwrap_or("-"),
                        "found status change"
                    );
                    return Some(Departure::exact(date));
                }
                None => {
                    warn!(
                        member_id = member.id,
                        revision = ?entry.revision,
                        "matching status change has no usable timestamp"
                    );
                    break;
                }
            }
        }
    }

    let latest = entries.first()?;
    match entry_timestamp(latest) {
        Some(date) => {
            debug!(
                member_id = member.id,
                revision = ?latest.revision,
                "using most recent revision as approximate leave date"
            );
            Some(Departure::approximate(date))
        }
        None => {
            warn!(
                member_id = member.id,
                "most recent revision has no usable timestamp"
            );
            None
        }
    }
}

fn entry_timestamp(entry: &ChangeLogEntry) -> Option<NaiveDateTime> {
    entry.created_on.as_deref().and_then(parse_timestamp)
}

/// Counts collected while resolving departures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartureReport {
    /// Description of the departed statuses in effect.
    pub departed_statuses: String,
    /// Members whose status denotes departure.
    pub departed_members: usize,
    /// Leave dates taken from a matching status change.
    pub exact: usize,
    /// Leave dates approximated from the most recent revision.
    pub approximate: usize,
    /// Departed members left without a leave date.
    pub unresolved: usize,
}

impl DepartureReport {
    pub fn resolved(&self) -> usize {
        self.exact + self.approximate
    }
}

/// Resolves leave dates for every departed member.
///
/// Returns a new member collection in input order; members that are not
/// departed, or already carry a departure, are passed through unchanged and
/// their history is never requested.
pub fn resolve_departures<S>(
    members: &[Member],
    source: &S,
    fields: &FieldMap,
    detection: DepartureDetection,
) -> (Vec<Member>, DepartureReport)
where
    S: ChangeLogSource + ?Sized,
{
    let statuses = DepartureStatuses::detect(members, detection);
    let status_field = fields.status.id;
    let mut report = DepartureReport {
        departed_statuses: statuses.describe(),
        ..DepartureReport::default()
    };
    info!(
        departed_statuses = %report.departed_statuses,
        status_field = %status_field,
        "identifying departed members"
    );

    let resolved = members
        .iter()
        .map(|member| {
            if !statuses.is_departed(member) {
                return member.clone();
            }
            report.departed_members += 1;
            if member.departure.is_some() {
                debug!(member_id = member.id, "departure already known");
                return member.clone();
            }

            let entries = source.fetch_change_log(member.id);
            let mut resolved = member.clone();
            match find_departure(member, &entries, status_field, &statuses) {
                Some(departure) => {
                    if departure.is_approximate() {
                        report.approximate += 1;
                    } else {
                        report.exact += 1;
                    }
                    resolved.departure = Some(departure);
                }
                None => {
                    debug!(
                        member_id = member.id,
                        entry_count = entries.len(),
                        "no leave date found"
                    );
                    report.unresolved += 1;
                }
            }
            resolved
        })
        .collect();

    info!(
        departed_members = report.departed_members,
        exact = report.exact,
        approximate = report.approximate,
        unresolved = report.unresolved,
        "departure resolution complete"
    );
    (resolved, report)
}
