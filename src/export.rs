use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use console::style;

use crate::cli::CommonArgs;
use crate::commits::aggregate_commits;
use crate::ingest::load_records;
use crate::model::{Commit, ExportEntry, ExportOutput, SCHEMA_VERSION};

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, input: &Path) -> anyhow::Result<()> {
    let quiet = json || ndjson;

    let outcome = load_records(
        input,
        common.commit_column,
        common.default_offset()?,
        quiet,
    )
    .context("Failed to load line records")?;

    let commits = aggregate_commits(outcome.records, common.repo_url.as_deref());
    let entries = prepare_entries(&commits);

    if json {
        output_json(&entries, input)?;
    } else if ndjson {
        output_ndjson(&entries)?;
    } else {
        output_summary(&entries);
    }

    Ok(())
}

fn prepare_entries(commits: &[Commit]) -> Vec<ExportEntry> {
    let mut entries: Vec<ExportEntry> = commits
        .iter()
        .map(|commit| ExportEntry {
            commit_id: commit.id.clone(),
            author: commit.author.clone(),
            datetime: commit.datetime,
            hour_frac: commit.hour_frac,
            total_lines: commit.total_lines(),
            url: commit.url.clone(),
        })
        .collect();

    entries.sort_by(|a, b| a.datetime.cmp(&b.datetime));
    entries
}

fn output_json(entries: &[ExportEntry], input: &Path) -> anyhow::Result<()> {
    let output = ExportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: input.to_string_lossy().to_string(),
        entries: entries.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(entries: &[ExportEntry]) -> anyhow::Result<()> {
    for entry in entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}

fn output_summary(entries: &[ExportEntry]) {
    println!("{}", style("Export Summary").bold());
    println!("{}", "─".repeat(50));

    if entries.is_empty() {
        println!("No data");
        return;
    }

    let total_lines: usize = entries.iter().map(|e| e.total_lines).sum();
    let unique_authors: HashSet<_> = entries.iter().map(|e| &e.author).collect();

    println!("Total commits: {}", style(entries.len()).cyan());
    println!("Total lines: {}", style(total_lines).cyan());
    println!("Unique authors: {}", style(unique_authors.len()).yellow());
    println!(
        "Date range: {} to {}",
        style(entries[0].datetime.format("%Y-%m-%d")).dim(),
        style(entries[entries.len() - 1].datetime.format("%Y-%m-%d")).dim()
    );

    println!("\nUse --json or --ndjson flags to export the raw data.");
}
