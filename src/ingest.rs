use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use indicatif::ProgressBar;
use serde::Deserialize;

use crate::cli::CommitColumnArg;
use crate::error::{PunchcardError, Result};
use crate::model::LineRecord;

/// One raw CSV row before normalization. Every field is optional text so a
/// single bad cell fails at row granularity, never for the whole load.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    commit: Option<String>,
    commit_hash: Option<String>,
    author: Option<String>,
    datetime: Option<String>,
    date: Option<String>,
    timezone: Option<String>,
    file: Option<String>,
    line: Option<String>,
    depth: Option<String>,
    length: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Which header column carries the commit identifier, resolved exactly once
/// at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitColumn {
    Commit,
    CommitHash,
}

pub struct LoadOutcome {
    pub records: Vec<LineRecord>,
    pub skipped: usize,
}

/// Resolve the commit key column against the CSV header. `Auto` probes for
/// the two legacy names; an explicit choice is validated against the header.
pub fn resolve_commit_column(
    headers: &csv::StringRecord,
    arg: CommitColumnArg,
) -> Result<CommitColumn> {
    let has = |name: &str| headers.iter().any(|h| h == name);
    match arg {
        CommitColumnArg::Auto => {
            if has("commit") {
                Ok(CommitColumn::Commit)
            } else if has("commit_hash") {
                Ok(CommitColumn::CommitHash)
            } else {
                Err(PunchcardError::MissingColumn(
                    "commit (or commit_hash)".to_string(),
                ))
            }
        }
        CommitColumnArg::Commit => {
            if has("commit") {
                Ok(CommitColumn::Commit)
            } else {
                Err(PunchcardError::MissingColumn("commit".to_string()))
            }
        }
        CommitColumnArg::CommitHash => {
            if has("commit_hash") {
                Ok(CommitColumn::CommitHash)
            } else {
                Err(PunchcardError::MissingColumn("commit_hash".to_string()))
            }
        }
    }
}

/// Load and normalize the per-line log from a CSV file. Malformed rows are
/// skipped with a warning on stderr (suppressed when `quiet`); the load only
/// fails for file-level problems.
pub fn load_records(
    path: &Path,
    column: CommitColumnArg,
    default_offset: FixedOffset,
    quiet: bool,
) -> Result<LoadOutcome> {
    let file = File::open(path)?;
    read_records(file, column, default_offset, quiet)
}

/// Reader-based variant of [`load_records`].
pub fn read_records<R: Read>(
    reader: R,
    column: CommitColumnArg,
    default_offset: FixedOffset,
    quiet: bool,
) -> Result<LoadOutcome> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let key = resolve_commit_column(csv_reader.headers()?, column)?;

    let progress = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_message("Loading line records...");
        Some(pb)
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (idx, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        let row_no = idx + 1;
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                if !quiet {
                    eprintln!("Warning: skipping row {row_no}: {e}");
                }
                skipped += 1;
                continue;
            }
        };
        match normalize(raw, key, row_no, default_offset) {
            Ok(record) => records.push(record),
            Err(e) => {
                if !quiet {
                    eprintln!("Warning: skipping row {row_no}: {e}");
                }
                skipped += 1;
            }
        }
        if row_no % 256 == 0 {
            if let Some(pb) = &progress {
                pb.tick();
            }
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(LoadOutcome { records, skipped })
}

/// Pure row transform: coerce numeric fields and resolve the timestamp.
/// Rows without a resolvable timestamp are excluded here so no commit ever
/// reaches the plot with an unusable hour fraction.
fn normalize(
    raw: RawRow,
    key: CommitColumn,
    row_no: usize,
    default_offset: FixedOffset,
) -> Result<LineRecord> {
    let commit_id = match key {
        CommitColumn::Commit => raw.commit,
        CommitColumn::CommitHash => raw.commit_hash,
    }
    .filter(|id| !id.is_empty())
    .ok_or_else(|| PunchcardError::MalformedRow {
        row: row_no,
        reason: "missing commit id".to_string(),
    })?;

    let line = parse_field(raw.line.as_deref(), "line", row_no)?;
    let depth = parse_field(raw.depth.as_deref(), "depth", row_no)?;
    let length = parse_field(raw.length.as_deref(), "length", row_no)?;

    let offset = raw
        .timezone
        .as_deref()
        .and_then(parse_offset)
        .unwrap_or(default_offset);

    let datetime = parse_datetime(raw.datetime.as_deref(), raw.date.as_deref(), offset)
        .ok_or_else(|| {
            PunchcardError::InvalidTimestamp(format!(
                "row {row_no}: '{}' is not a resolvable timestamp",
                raw.datetime.as_deref().unwrap_or("")
            ))
        })?;

    let date = raw
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .unwrap_or_else(|| datetime.date_naive());

    Ok(LineRecord {
        commit_id,
        author: raw.author.unwrap_or_default(),
        file: raw.file.filter(|f| !f.is_empty()),
        line,
        depth,
        length,
        language: raw.kind.filter(|k| !k.is_empty()),
        date,
        datetime,
    })
}

fn parse_field(value: Option<&str>, name: &str, row_no: usize) -> Result<u32> {
    value
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or_else(|| PunchcardError::MalformedRow {
            row: row_no,
            reason: format!("non-numeric {name} '{}'", value.unwrap_or("")),
        })
}

/// Parse `"YYYY-MM-DD HH:MM:SS"` in the row's own offset, then RFC 3339,
/// then fall back to the `date` column at midnight. `None` means the row
/// cannot be placed in time and must be dropped, never defaulted to "now".
fn parse_datetime(
    datetime: Option<&str>,
    date: Option<&str>,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    if let Some(s) = datetime {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            if let Some(dt) = offset.from_local_datetime(&naive).single() {
                return Some(dt);
            }
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt);
        }
    }
    let day = NaiveDate::parse_from_str(date?, "%Y-%m-%d").ok()?;
    offset.from_local_datetime(&day.and_hms_opt(0, 0, 0)?).single()
}

/// Parse a `±HH:MM` / `±HHMM` / `Z` offset string.
pub fn parse_offset(tz: &str) -> Option<FixedOffset> {
    let tz = tz.trim();
    if tz.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = if let Some(rest) = tz.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = tz.strip_prefix('-') {
        (-1, rest)
    } else {
        return None;
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
