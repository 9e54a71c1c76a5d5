use std::path::PathBuf;

use roster_cli::pipeline::PipelineOutput;

#[derive(Debug)]
pub struct ReportResult {
    pub cache_dir: PathBuf,
    pub record_count: usize,
    /// Revision cache files present in the cache directory.
    pub cached_change_logs: usize,
    /// CSV path, when the series was written.
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub pipeline: PipelineOutput,
}
