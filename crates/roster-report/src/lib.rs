//! Membership report generation.
//!
//! This crate turns resolved members into the monthly active-member series
//! and writes it out:
//!
//! - **monthly**: calendar-month aggregation with a consistency check
//! - **export**: CSV output of the series
//! - **summary**: current, peak and average membership

mod calendar;
mod export;
mod monthly;
mod summary;

// Re-export public types and functions
pub use calendar::{month_end, month_start, next_month};
pub use export::{SERIES_HEADER, series_csv_string, write_series_csv, write_series_csv_file};
pub use monthly::{aggregate_monthly, aggregate_monthly_as_of, reconcile_bucket};
pub use summary::SeriesSummary;
