//! CLI argument definitions for the roster tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Reconstruct monthly membership headcounts from record system data",
    long_about = "Reconstruct monthly membership headcounts from record system data.\n\n\
                  Reads a cache directory of member records and revision histories,\n\
                  recovers leave dates and writes a month-by-month CSV series."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include member names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the monthly membership series from a cache directory.
    Report(ReportArgs),

    /// Show the fields of the first cached record and their resolved roles.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Directory holding members_cache.json and revisions_cache_<id>.json files.
    #[arg(value_name = "CACHE_DIR")]
    pub cache_dir: PathBuf,

    /// CSV file to write.
    #[arg(
        long = "output",
        short = 'o',
        value_name = "CSV",
        default_value = "membership_stats.csv"
    )]
    pub output: PathBuf,

    /// Number of leading records inspected to resolve field roles.
    #[arg(long = "sample-size", value_name = "N", default_value_t = 5)]
    pub sample_size: usize,

    #[command(flatten)]
    pub fields: FieldIdArgs,

    /// Treat this status option id as the departed status.
    ///
    /// By default departed statuses are recognized by leaving markers in
    /// their labels ("aus", "exit", "left", ...).
    #[arg(long = "departed-option-id", value_name = "ID")]
    pub departed_option_id: Option<i64>,

    /// Processing date used to extend the series (default: today).
    #[arg(long = "as-of", value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub as_of: Option<NaiveDate>,

    /// Compute and print the series without writing the CSV.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Directory holding members_cache.json.
    #[arg(value_name = "CACHE_DIR")]
    pub cache_dir: PathBuf,

    /// Number of leading records inspected to resolve field roles.
    #[arg(long = "sample-size", value_name = "N", default_value_t = 5)]
    pub sample_size: usize,

    #[command(flatten)]
    pub fields: FieldIdArgs,
}

/// Explicit field identifiers that bypass label matching.
#[derive(clap::Args)]
pub struct FieldIdArgs {
    /// Field id of the membership start date.
    #[arg(long = "join-field", value_name = "ID")]
    pub join_field: Option<i64>,

    /// Field id of the membership status.
    #[arg(long = "status-field", value_name = "ID")]
    pub status_field: Option<i64>,

    /// Field id of the member name.
    #[arg(long = "name-field", value_name = "ID")]
    pub name_field: Option<i64>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_defaults() {
        let cli = Cli::parse_from(["roster", "report", "cache"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.output, PathBuf::from("membership_stats.csv"));
        assert_eq!(args.sample_size, 5);
        assert!(args.as_of.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn report_accepts_overrides_and_date() {
        let cli = Cli::parse_from([
            "roster",
            "report",
            "cache",
            "--status-field",
            "42",
            "--departed-option-id",
            "3",
            "--as-of",
            "2023-05-15",
            "-v",
        ]);
        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.fields.status_field, Some(42));
        assert_eq!(args.departed_option_id, Some(3));
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2023, 5, 15));
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(Cli::try_parse_from(["roster", "report", "cache", "--as-of", "15.05.2023"]).is_err());
    }
}
