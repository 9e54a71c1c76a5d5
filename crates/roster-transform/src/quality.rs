//! Data-quality checks on member dates.
//!
//! A leave date is expected to follow the join date, but neither
//! normalization nor departure resolution enforces it. These checks only
//! report; members are never modified.

use std::fmt;

use chrono::NaiveDateTime;
use tracing::warn;

use roster_model::{Member, MemberId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAnomalyKind {
    /// A leave date is present but the join date is missing.
    LeaveWithoutJoin,
    /// The leave date precedes the join date.
    LeaveBeforeJoin,
}

impl fmt::Display for DateAnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeaveWithoutJoin => write!(f, "leave date without join date"),
            Self::LeaveBeforeJoin => write!(f, "leave date before join date"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateAnomaly {
    pub member_id: MemberId,
    pub kind: DateAnomalyKind,
    pub join_date: Option<NaiveDateTime>,
    pub leave_date: NaiveDateTime,
}

/// Lists members whose join and leave dates are inconsistent.
pub fn check_member_dates(members: &[Member]) -> Vec<DateAnomaly> {
    let mut anomalies = Vec::new();
    for member in members {
        let Some(leave_date) = member.leave_date() else {
            continue;
        };
        let kind = match member.join_date {
            None => DateAnomalyKind::LeaveWithoutJoin,
            Some(join_date) if leave_date < join_date => DateAnomalyKind::LeaveBeforeJoin,
            Some(_) => continue,
        };
        warn!(
            member_id = member.id,
            join_date = ?member.join_date,
            %leave_date,
            "{kind}"
        );
        anomalies.push(DateAnomaly {
            member_id: member.id,
            kind,
            join_date: member.join_date,
            leave_date,
        });
    }
    anomalies
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use roster_model::Departure;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn flags_inconsistent_dates_only() {
        let members = vec![
            Member::new(1)
                .with_join_date(day(2023, 1, 1))
                .with_departure(Departure::exact(day(2023, 6, 1))),
            Member::new(2)
                .with_join_date(day(2023, 6, 1))
                .with_departure(Departure::exact(day(2023, 1, 1))),
            Member::new(3).with_departure(Departure::approximate(day(2023, 1, 1))),
            Member::new(4).with_join_date(day(2023, 1, 1)),
        ];

        let anomalies = check_member_dates(&members);
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0].member_id, 2);
        assert_eq!(anomalies[0].kind, DateAnomalyKind::LeaveBeforeJoin);
        assert_eq!(anomalies[1].member_id, 3);
        assert_eq!(anomalies[1].kind, DateAnomalyKind::LeaveWithoutJoin);
    }

    #[test]
    fn same_day_departure_is_fine() {
        let members = vec![Member::new(1)
            .with_join_date(day(2023, 1, 1))
            .with_departure(Departure::exact(day(2023, 1, 1)))];
        assert!(check_member_dates(&members).is_empty());
    }
}
