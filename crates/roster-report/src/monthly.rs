//! Monthly membership aggregation.
//!
//! The series runs from the month of the earliest join date through one month
//! past the later of "now" and the latest leave date. Each bucket is tallied
//! from scratch against the end of its month, so cumulative totals are
//! snapshots rather than carried-forward counters.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, info, warn};

use roster_model::{Member, MonthlyBucket};

use crate::calendar::{month_end, month_start, next_month};

/// Aggregates members into monthly buckets using the current time.
pub fn aggregate_monthly(members: &[Member]) -> Vec<MonthlyBucket> {
    aggregate_monthly_as_of(members, Utc::now().naive_utc())
}

/// Aggregates members into monthly buckets, oldest first.
///
/// Members without a join date are ignored. Returns an empty series when no
/// member has a join date.
pub fn aggregate_monthly_as_of(members: &[Member], now: NaiveDateTime) -> Vec<MonthlyBucket> {
    let valid: Vec<&Member> = members.iter().filter(|m| m.join_date.is_some()).collect();
    let Some(earliest) = valid.iter().filter_map(|m| m.join_date).min() else {
        info!(
            member_count = members.len(),
            "no members with join dates; nothing to aggregate"
        );
        return Vec::new();
    };

    let latest = members
        .iter()
        .filter_map(Member::leave_date)
        .fold(now, NaiveDateTime::max);
    let start = month_start(earliest.date());
    let latest_month = month_start(latest.date());
    let end = next_month(latest_month).unwrap_or(latest_month);

    let mut buckets = Vec::new();
    let mut month = Some(start);
    while let Some(current) = month.filter(|m| *m <= end) {
        match tally_month(current, &valid) {
            Ok(bucket) => buckets.push(bucket),
            Err(error) => warn!(month = %current, %error, "skipping month"),
        }
        month = next_month(current);
    }

    info!(
        valid_members = valid.len(),
        first_month = %start,
        last_month = %end,
        bucket_count = buckets.len(),
        "monthly aggregation complete"
    );
    buckets
}

fn tally_month(month: NaiveDate, members: &[&Member]) -> roster_model::Result<MonthlyBucket> {
    let mut bucket = MonthlyBucket::new(month)?;
    let cutoff = month_end(month);

    for member in members {
        let Some(join_date) = member.join_date else {
            continue;
        };
        if join_date > cutoff {
            continue;
        }
        bucket.total_joined += 1;
        match member.leave_date() {
            Some(leave_date) if leave_date <= cutoff => bucket.total_left += 1,
            _ => bucket.active_members += 1,
        }
    }

    reconcile_bucket(&mut bucket);
    debug!(
        month = %bucket.month_label(),
        active = bucket.active_members,
        joined = bucket.total_joined,
        left = bucket.total_left,
        "tallied month"
    );
    Ok(bucket)
}

/// Forces `active_members` to `total_joined - total_left`.
///
/// Returns `true` when the bucket had to be corrected.
pub fn reconcile_bucket(bucket: &mut MonthlyBucket) -> bool {
    let expected = bucket.expected_active();
    if bucket.active_members == expected {
        return false;
    }
    warn!(
        month = %bucket.month_label(),
        active = bucket.active_members,
        joined = bucket.total_joined,
        left = bucket.total_left,
        "active count disagrees with joined minus left; recomputing"
    );
    bucket.active_members = expected;
    true
}
