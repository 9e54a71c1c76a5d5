//! Canonical member entities.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Record identifier of a member.
pub type MemberId = i64;

/// Whether a departure date was read from the matching status transition or
/// approximated from the most recent revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeparturePrecision {
    Exact,
    Approximate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub date: NaiveDateTime,
    pub precision: DeparturePrecision,
}

impl Departure {
    pub fn exact(date: NaiveDateTime) -> Self {
        Self {
            date,
            precision: DeparturePrecision::Exact,
        }
    }

    pub fn approximate(date: NaiveDateTime) -> Self {
        Self {
            date,
            precision: DeparturePrecision::Approximate,
        }
    }

    pub fn is_approximate(&self) -> bool {
        self.precision == DeparturePrecision::Approximate
    }
}

/// A member as seen by the pipeline.
///
/// `join_date` is set by normalization and never changed afterwards;
/// `departure` is set at most once by departure resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: Option<String>,
    pub join_date: Option<NaiveDateTime>,
    /// Current status label.
    pub status: Option<String>,
    /// Option id of the current status, when the status is categorical.
    pub status_option_id: Option<i64>,
    pub departure: Option<Departure>,
}

impl Member {
    pub fn new(id: MemberId) -> Self {
        Self {
            id,
            name: None,
            join_date: None,
            status: None,
            status_option_id: None,
            departure: None,
        }
    }

    #[must_use]
    pub fn with_join_date(mut self, join_date: NaiveDateTime) -> Self {
        self.join_date = Some(join_date);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_departure(mut self, departure: Departure) -> Self {
        self.departure = Some(departure);
        self
    }

    pub fn leave_date(&self) -> Option<NaiveDateTime> {
        self.departure.map(|departure| departure.date)
    }

    /// Name for log and report output.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}
