//! Membership roster data model.
//!
//! This crate holds the types shared by every stage of the roster pipeline:
//!
//! - **record**: raw records as delivered by the record system
//! - **changelog**: per-record revision history with field deltas
//! - **value**: decoding of field value payloads into a tagged sum type
//! - **fields**: the field role mapping table built once per run
//! - **member**: canonical member entities and their departure
//! - **bucket**: one calendar month of aggregated counts
//! - **options**: run configuration shared by the library crates
//! - **source**: traits implemented by record system collaborators

#![deny(unsafe_code)]

pub mod bucket;
pub mod changelog;
pub mod error;
pub mod fields;
pub mod member;
pub mod options;
pub mod record;
pub mod source;
pub mod value;

pub use bucket::MonthlyBucket;
pub use changelog::{ChangeLogEntry, FieldDelta};
pub use error::{ModelError, Result};
pub use fields::{
    DEFAULT_JOIN_DATE_FIELD, DEFAULT_NAME_FIELD, DEFAULT_STATUS_FIELD, FieldId, FieldMap,
    FieldRole, Resolution, ResolvedField,
};
pub use member::{Departure, DeparturePrecision, Member, MemberId};
pub use options::{DepartureDetection, FieldOverrides, ResolverOptions, RunOptions};
pub use record::{FieldType, RawField, RawRecord};
pub use source::{ChangeLogSource, RecordSource};
pub use value::ValuePayload;
