//! Cache file discovery.

use std::path::Path;

use roster_model::MemberId;

use crate::error::{IngestError, Result};

/// File holding the JSON array of all member records.
pub const MEMBERS_CACHE_FILE: &str = "members_cache.json";

const REVISIONS_PREFIX: &str = "revisions_cache_";
const JSON_EXTENSION: &str = ".json";

/// File name of a member's cached revision history.
pub fn revisions_cache_file(member_id: MemberId) -> String {
    format!("{REVISIONS_PREFIX}{member_id}{JSON_EXTENSION}")
}

/// Extracts the member id from a revisions cache file name.
pub fn parse_revisions_cache_file(file_name: &str) -> Option<MemberId> {
    file_name
        .strip_prefix(REVISIONS_PREFIX)?
        .strip_suffix(JSON_EXTENSION)?
        .parse()
        .ok()
}

/// Lists members with a cached revision history.
///
/// Returns ids sorted ascending.
pub fn list_cached_change_logs(dir: &Path) -> Result<Vec<MemberId>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut ids = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if let Some(id) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(parse_revisions_cache_file)
        {
            ids.push(id);
        }
    }

    ids.sort_unstable();
    Ok(ids)
}
