//! CSV export of the monthly series.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use roster_model::MonthlyBucket;

#[derive(Serialize)]
struct SeriesRow {
    month: String,
    active_members: usize,
    total_joined: usize,
    total_left: usize,
}

impl From<&MonthlyBucket> for SeriesRow {
    fn from(bucket: &MonthlyBucket) -> Self {
        Self {
            month: bucket.month_label(),
            active_members: bucket.active_members,
            total_joined: bucket.total_joined,
            total_left: bucket.total_left,
        }
    }
}

/// Column names of the series CSV, in `SeriesRow` field order.
pub const SERIES_HEADER: [&str; 4] = ["month", "active_members", "total_joined", "total_left"];

/// Writes the series as CSV. The header row is written even when the series is empty.
pub fn write_series_csv<W: Write>(writer: W, buckets: &[MonthlyBucket]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(SERIES_HEADER).context("write csv header")?;
    for bucket in buckets {
        csv.serialize(SeriesRow::from(bucket))
            .with_context(|| format!("write row {}", bucket.month_label()))?;
    }
    csv.flush().context("flush csv")?;
    Ok(())
}

/// Writes the series to a CSV file, replacing any existing file.
pub fn write_series_csv_file(path: &Path, buckets: &[MonthlyBucket]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    write_series_csv(file, buckets).with_context(|| format!("write {}", path.display()))
}

/// Renders the series as a CSV string.
pub fn series_csv_string(buckets: &[MonthlyBucket]) -> Result<String> {
    let mut buffer = Vec::new();
    write_series_csv(&mut buffer, buckets)?;
    String::from_utf8(buffer).context("csv output is not utf-8")
}
