//! Error types for roster ingestion.

use std::path::PathBuf;
use thiserror::Error;

use roster_model::ModelError;

/// Errors that can occur while reading cached record system responses.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Cache directory not found or not a directory.
    #[error("cache directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cache file not found.
    #[error("cache file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not a valid response payload.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/cache/members_cache.json"),
        };
        assert_eq!(
            err.to_string(),
            "cache file not found: /cache/members_cache.json"
        );
        assert!(err.is_not_found());
    }
}
