//! Record source backed by a directory of cached API responses.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use roster_model::{ChangeLogEntry, ChangeLogSource, MemberId, RawRecord, RecordSource};

use crate::discovery::{MEMBERS_CACHE_FILE, revisions_cache_file};
use crate::error::{IngestError, Result};

/// Reads member records and revision histories from a cache directory.
///
/// The directory holds `members_cache.json` (all records) and one
/// `revisions_cache_<item_id>.json` per member whose history was fetched.
#[derive(Debug, Clone)]
pub struct CacheDirSource {
    dir: PathBuf,
}

impl CacheDirSource {
    /// Opens a cache directory. The directory must exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(IngestError::DirectoryNotFound { path: dir });
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn members_path(&self) -> PathBuf {
        self.dir.join(MEMBERS_CACHE_FILE)
    }

    pub fn revisions_path(&self, member_id: MemberId) -> PathBuf {
        self.dir.join(revisions_cache_file(member_id))
    }

    /// Reads all cached member records.
    pub fn read_members(&self) -> Result<Vec<RawRecord>> {
        let path = self.members_path();
        let content = read_file(&path)?;
        let records = RawRecord::list_from_json(&content)
            .map_err(|source| IngestError::Parse { path: path.clone(), source })?;
        debug!(path = %path.display(), record_count = records.len(), "loaded members from cache");
        Ok(records)
    }

    /// Reads one member's cached revision history.
    pub fn read_change_log(&self, member_id: MemberId) -> Result<Vec<ChangeLogEntry>> {
        let path = self.revisions_path(member_id);
        let content = read_file(&path)?;
        ChangeLogEntry::list_from_json(&content)
            .map_err(|source| IngestError::Parse { path, source })
    }
}

impl RecordSource for CacheDirSource {
    type Error = IngestError;

    fn fetch_all_members(&self) -> Result<Vec<RawRecord>> {
        self.read_members()
    }
}

impl ChangeLogSource for CacheDirSource {
    fn fetch_change_log(&self, member_id: MemberId) -> Vec<ChangeLogEntry> {
        match self.read_change_log(member_id) {
            Ok(entries) => {
                debug!(member_id, entry_count = entries.len(), "loaded revisions from cache");
                entries
            }
            Err(error) if error.is_not_found() => {
                debug!(member_id, "no cached revisions");
                Vec::new()
            }
            Err(error) => {
                warn!(member_id, %error, "ignoring unreadable revisions");
                Vec::new()
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
