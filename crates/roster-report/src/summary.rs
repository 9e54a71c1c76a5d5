use chrono::NaiveDate;
use serde::Serialize;

use roster_model::MonthlyBucket;

/// Headline figures of a monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// Active members in the last bucket.
    pub current_active: usize,
    pub peak_active: usize,
    /// First month in which the peak was reached.
    pub peak_month: NaiveDate,
    /// Mean active members across all buckets.
    pub average_active: f64,
    pub first_month: NaiveDate,
    pub last_month: NaiveDate,
    pub months: usize,
}

impl SeriesSummary {
    /// Summarizes a series; `None` for an empty series.
    pub fn from_buckets(buckets: &[MonthlyBucket]) -> Option<Self> {
        let first = buckets.first()?;
        let last = buckets.last()?;

        let mut peak = first;
        for bucket in buckets {
            if bucket.active_members > peak.active_members {
                peak = bucket;
            }
        }
        let total: usize = buckets.iter().map(|b| b.active_members).sum();

        Some(Self {
            current_active: last.active_members,
            peak_active: peak.active_members,
            peak_month: peak.month,
            average_active: total as f64 / buckets.len() as f64,
            first_month: first.month,
            last_month: last.month,
            months: buckets.len(),
        })
    }
}
