use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One modified source line in one commit, as parsed from the per-line log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub commit_id: String,
    pub author: String,
    pub file: Option<String>,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub language: Option<String>,
    pub date: NaiveDate,
    pub datetime: DateTime<FixedOffset>,
}

/// Aggregation root over all line records sharing a commit id.
///
/// Constructed once per dataset load and immutable afterward; filtering
/// produces borrowed subsets, never mutated commits. The owned records are
/// reachable only through the read-only accessor.
#[derive(Debug, Clone)]
pub struct Commit {
    pub id: String,
    pub url: Option<String>,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    records: Vec<LineRecord>,
}

impl Commit {
    /// Build a commit from a non-empty group of records sharing one id.
    /// The first record supplies the attributed author and timestamp.
    pub(crate) fn from_group(records: Vec<LineRecord>, repo_url: Option<&str>) -> Option<Commit> {
        let first = records.first()?;
        let hour_frac = first.datetime.hour() as f64 + first.datetime.minute() as f64 / 60.0;
        Some(Commit {
            id: first.commit_id.clone(),
            url: repo_url
                .map(|base| format!("{}/commit/{}", base.trim_end_matches('/'), first.commit_id)),
            author: first.author.clone(),
            datetime: first.datetime,
            hour_frac,
            records,
        })
    }

    pub fn records(&self) -> &[LineRecord] {
        &self.records
    }

    pub fn total_lines(&self) -> usize {
        self.records.len()
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// Time-of-day bucket for the productivity metric. Enumeration order is the
/// tie-break order when two buckets hold the same record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::Morning,
        Period::Afternoon,
        Period::Evening,
        Period::Night,
    ];

    pub fn from_hour(hour: u32) -> Period {
        match hour {
            5..=11 => Period::Morning,
            12..=16 => Period::Afternoon,
            17..=20 => Period::Evening,
            _ => Period::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Afternoon => "Afternoon",
            Period::Evening => "Evening",
            Period::Night => "Night",
        }
    }
}

/// Per-language share of the line records in a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSlice {
    pub language: String,
    pub count: usize,
    /// Fraction of the selection's total line count, in [0, 1].
    pub proportion: f64,
}

/// Derived summary of a commit subset. Recomputed fresh on every filter
/// change; `None` fields mean "not applicable" and render as `N/A`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub commit_count: usize,
    pub total_line_count: usize,
    pub file_count: Option<usize>,
    pub languages: Vec<LanguageSlice>,
    pub most_productive: Option<Period>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub skipped_rows: usize,
    pub report: AggregateReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEntry {
    pub commit_id: String,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub entries: Vec<ExportEntry>,
}
