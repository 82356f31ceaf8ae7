use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use console::style;

use crate::cli::CommonArgs;
use crate::commits::aggregate_commits;
use crate::error::{PunchcardError, Result};
use crate::filter::FilterEngine;
use crate::ingest::load_records;
use crate::model::{AggregateReport, SummaryOutput, SCHEMA_VERSION};
use crate::report::build_report;
use crate::scale::ScaleSet;
use crate::util::percent_label;

pub fn exec(
    common: CommonArgs,
    json: bool,
    ndjson: bool,
    until: Option<String>,
    input: &Path,
) -> anyhow::Result<()> {
    // Keep stdout clean for machine-readable output
    let quiet = json || ndjson;

    let outcome = load_records(
        input,
        common.commit_column,
        common.default_offset()?,
        quiet,
    )
    .context("Failed to load line records")?;
    let skipped = outcome.skipped;

    let commits = aggregate_commits(outcome.records, common.repo_url.as_deref());

    let cutoff = until
        .as_deref()
        .map(parse_cutoff)
        .transpose()
        .context("Failed to parse --until")?;

    let scales = ScaleSet::from_commits(&commits);
    let mut engine = FilterEngine::new();
    engine.set_time_cutoff(cutoff);
    let selection = engine.current_selection(&commits, &scales);
    let report = build_report(&selection);

    if json {
        output_json(&report, input, cutoff, skipped)?;
    } else if ndjson {
        output_ndjson(&report)?;
    } else {
        output_pretty(&report, commits.len(), skipped);
    }

    Ok(())
}

/// RFC 3339, or a bare date interpreted as its end of day so the named day's
/// commits stay inside the cutoff.
fn parse_cutoff(input: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(eod) = date.and_hms_opt(23, 59, 59) {
            return Ok(Utc.from_utc_datetime(&eod).fixed_offset());
        }
    }
    Err(PunchcardError::InvalidDate(format!(
        "'{input}' is not RFC3339 or YYYY-MM-DD"
    )))
}

fn output_json(
    report: &AggregateReport,
    input: &Path,
    cutoff: Option<DateTime<FixedOffset>>,
    skipped: usize,
) -> anyhow::Result<()> {
    let output = SummaryOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: input.to_string_lossy().to_string(),
        cutoff,
        skipped_rows: skipped,
        report: report.clone(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(report: &AggregateReport) -> anyhow::Result<()> {
    for slice in &report.languages {
        println!("{}", serde_json::to_string(slice)?);
    }
    Ok(())
}

fn output_pretty(report: &AggregateReport, total_commits: usize, skipped: usize) {
    println!("{}", style("Commit Summary").bold());
    println!("{}", "─".repeat(50));

    if report.commit_count == 0 {
        println!("No data");
        return;
    }

    println!("Total commits: {}", style(report.commit_count).cyan());
    println!("Total lines: {}", style(report.total_line_count).cyan());
    match report.file_count {
        Some(n) => println!("Files touched: {}", style(n).cyan()),
        None => println!("Files touched: {}", style("N/A").dim()),
    }
    match report.most_productive {
        Some(period) => println!(
            "Most productive time of day: {}",
            style(period.label()).green()
        ),
        None => println!("Most productive time of day: {}", style("N/A").dim()),
    }

    if report.languages.is_empty() {
        println!("Language breakdown: {}", style("N/A").dim());
    } else {
        println!("Language breakdown:");
        for slice in &report.languages {
            println!(
                "  {:<12} {:>6} lines ({})",
                slice.language,
                slice.count,
                style(percent_label(slice.proportion)).yellow()
            );
        }
    }

    if report.commit_count < total_commits {
        println!(
            "\n{} of {} commits inside the cutoff",
            report.commit_count, total_commits
        );
    }
    if skipped > 0 {
        println!("{}", style(format!("{skipped} malformed rows skipped")).dim());
    }
}
