use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Aggregated counts for one calendar month.
///
/// `total_joined` and `total_left` are cumulative as of the end of `month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// First day of the month.
    pub month: NaiveDate,
    pub active_members: usize,
    pub total_joined: usize,
    pub total_left: usize,
}

impl MonthlyBucket {
    /// Creates an empty bucket anchored at `month`.
    pub fn new(month: NaiveDate) -> Result<Self> {
        if month.day() != 1 {
            return Err(ModelError::MonthNotAnchored(month));
        }
        Ok(Self {
            month,
            active_members: 0,
            total_joined: 0,
            total_left: 0,
        })
    }

    /// Active count implied by the cumulative totals.
    pub fn expected_active(&self) -> usize {
        self.total_joined.saturating_sub(self.total_left)
    }

    pub fn is_consistent(&self) -> bool {
        self.total_left <= self.total_joined && self.active_members == self.expected_active()
    }

    /// `YYYY-MM` label.
    pub fn month_label(&self) -> String {
        self.month.format("%Y-%m").to_string()
    }
}
