use anyhow::Result;
use chrono::{FixedOffset, Offset, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::error::PunchcardError;

#[derive(Parser)]
#[command(name = "punchcard")]
#[command(about = "Commit history analytics over a per-line log: summaries, exports, and an interactive scatter plot")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Base repository URL used to derive commit links")]
    pub repo_url: Option<String>,

    #[arg(
        long,
        value_enum,
        default_value_t = CommitColumnArg::Auto,
        help = "Header column holding the commit identifier"
    )]
    pub commit_column: CommitColumnArg,

    #[arg(long, help = "Fallback UTC offset for rows without a timezone (e.g. +02:00)")]
    pub timezone: Option<String>,
}

/// Which column names the commit key. `auto` probes the CSV header once at
/// load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CommitColumnArg {
    Auto,
    Commit,
    CommitHash,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate the log and print summary statistics
    Summary {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON (one language slice per line)")]
        ndjson: bool,

        #[arg(long, help = "Only count commits at or before this time (RFC3339 or YYYY-MM-DD)")]
        until: Option<String>,

        #[arg(help = "Path to the per-line commit log (CSV)")]
        input: PathBuf,
    },
    /// Export commit-level entities with derived fields
    Export {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(help = "Path to the per-line commit log (CSV)")]
        input: PathBuf,
    },
    /// Interactive time-of-day scatter plot with brush and cutoff filtering
    Plot {
        #[arg(help = "Path to the per-line commit log (CSV)")]
        input: PathBuf,
    },
}

impl CommonArgs {
    /// The offset applied to rows whose timezone column is empty.
    pub fn default_offset(&self) -> crate::error::Result<FixedOffset> {
        match &self.timezone {
            Some(tz) => crate::ingest::parse_offset(tz)
                .ok_or_else(|| PunchcardError::InvalidDate(format!("invalid UTC offset '{tz}'"))),
            None => Ok(Utc.fix()),
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Summary {
                json,
                ndjson,
                until,
                input,
            } => crate::summary::exec(self.common, json, ndjson, until, &input),
            Commands::Export { json, ndjson, input } => {
                crate::export::exec(self.common, json, ndjson, &input)
            }
            Commands::Plot { input } => crate::tui::run(&self.common, &input),
        }
    }
}
