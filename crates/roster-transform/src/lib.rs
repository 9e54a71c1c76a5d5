//! Roster member transformation.
//!
//! This crate turns raw records into members and enriches them:
//!
//! - **datetime**: timestamp parsing for record system values
//! - **normalize**: raw record to [`roster_model::Member`] conversion
//! - **departure**: leave date resolution from revision histories
//! - **quality**: join/leave date consistency checks

pub mod datetime;
pub mod departure;
pub mod normalize;
pub mod quality;

pub use datetime::parse_timestamp;
pub use departure::{
    DepartureReport, DepartureStatuses, FALLBACK_DEPARTED_STATUS, LEAVING_MARKERS,
    find_departure, resolve_departures,
};
pub use normalize::{StatusDistribution, normalize, normalize_record};
pub use quality::{DateAnomaly, DateAnomalyKind, check_member_dates};
