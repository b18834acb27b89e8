use clap::Parser;
use std::path::PathBuf;

use crate::block::EmitMode;
use crate::filter::Keywords;

/// Immutable configuration used by the application runtime
#[derive(Debug, Clone)]
pub struct Config {
    pub keywords: Keywords,
    /// Raw `--date` value; validated by the runtime after the run stamp is written.
    pub date: Option<String>,
    pub count: u32,
    pub channel: String,
    pub raw_log: PathBuf,
    pub output: PathBuf,
    pub skip_fetch: bool,
    pub emit: EmitMode,
    pub no_color: bool,
}

/// User-facing CLI arguments (kept private to the CLI layer)
#[derive(Parser, Debug)]
#[command(name = "logsift", version, about = "System event log fetcher and keyword filter")]
struct Args {
    /// Comma-separated keywords to search for. Defaults to a built-in list.
    #[arg(short = 'k', long = "keywords", value_name = "LIST")]
    keywords: Option<String>,

    /// Only keep entries logged on this day (YYYY-MM-DD)
    ///
    /// Sections start at lines reading `Date: MM/DD/YYYY hh:mm:ss AM/PM`.
    /// Indentation before `Date:` is ignored.
    #[arg(short = 'd', long = "date", value_name = "YYYY-MM-DD")]
    date: Option<String>,

    /// Number of most recent records to fetch
    #[arg(short = 'n', long = "count", default_value_t = 100)]
    count: u32,

    /// Event log channel to query
    #[arg(long = "channel", default_value = "System")]
    channel: String,

    /// File the fetched records are written to (overwritten every run)
    #[arg(long = "raw-log", value_name = "PATH", default_value = "system_log.txt")]
    raw_log: PathBuf,

    /// File every run's results are appended to
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "filtered_logs_combined.txt")]
    output: PathBuf,

    /// Filter the existing raw log file without fetching
    #[arg(long = "skip-fetch")]
    skip_fetch: bool,

    /// Emit an entry once for every matching line it contains
    #[arg(long = "per-match")]
    per_match: bool,

    /// Disable colored console output
    #[arg(long = "no-color", alias = "no-colour")]
    no_color: bool,
}

/// Parse CLI options into an application Config
pub fn parse() -> Config {
    Args::parse().into_config()
}

impl Args {
    fn into_config(self) -> Config {
        Config {
            keywords: Keywords::from_arg(self.keywords.as_deref()),
            date: self.date,
            count: self.count,
            channel: self.channel,
            raw_log: self.raw_log,
            output: self.output,
            skip_fetch: self.skip_fetch,
            emit: if self.per_match {
                EmitMode::PerMatch
            } else {
                EmitMode::PerEntry
            },
            no_color: self.no_color,
        }
    }
}
