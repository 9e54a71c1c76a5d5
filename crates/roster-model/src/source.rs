//! Interfaces to the record system.
//!
//! Authentication, pagination and caching belong to implementors; the
//! pipeline only sees fully materialized records and change logs.

use crate::changelog::ChangeLogEntry;
use crate::member::MemberId;
use crate::record::RawRecord;

/// Delivers every member record in its current state.
pub trait RecordSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_all_members(&self) -> Result<Vec<RawRecord>, Self::Error>;
}

/// Delivers the revision history of one member.
///
/// Implementors return an empty sequence when the history cannot be fetched.
/// Entries must be returned in the record system's order.
pub trait ChangeLogSource {
    fn fetch_change_log(&self, member_id: MemberId) -> Vec<ChangeLogEntry>;
}

impl<F> ChangeLogSource for F
where
    F: Fn(MemberId) -> Vec<ChangeLogEntry>,
{
    fn fetch_change_log(&self, member_id: MemberId) -> Vec<ChangeLogEntry> {
        self(member_id)
    }
}
