//! Calendar month arithmetic.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the following month, `None` past the supported date range.
pub fn next_month(month: NaiveDate) -> Option<NaiveDate> {
    month_start(month).checked_add_months(Months::new(1))
}

/// Last second of the month starting at `month`.
pub fn month_end(month: NaiveDate) -> NaiveDateTime {
    next_month(month)
        .map(|next| next.and_time(NaiveTime::MIN))
        .and_then(|next| next.checked_sub_signed(TimeDelta::seconds(1)))
        .unwrap_or(NaiveDateTime::MAX)
}
