//! Roster data ingestion.
//!
//! This crate reads record system responses that were cached on disk by a
//! previous fetch and serves them through the `RecordSource` and
//! `ChangeLogSource` traits.
//!
//! # Example
//!
//! ```ignore
//! use roster_ingest::CacheDirSource;
//! use roster_model::{ChangeLogSource, RecordSource};
//!
//! let source = CacheDirSource::open("cache")?;
//! let records = source.fetch_all_members()?;
//! let history = source.fetch_change_log(records[0].item_id);
//! ```

mod cache;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sources ===
pub use cache::CacheDirSource;

// === Cache Layout ===
pub use discovery::{
    MEMBERS_CACHE_FILE, list_cached_change_logs, parse_revisions_cache_file, revisions_cache_file,
};
