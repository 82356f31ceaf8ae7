use std::collections::{HashMap, HashSet};

use chrono::Timelike;

use crate::model::{AggregateReport, Commit, LanguageSlice, Period};

/// Pure function of a commit subset: counts, distinct files, per-language
/// breakdown, and the most productive time-of-day bucket. The empty subset
/// yields the zeroed report with `None` sentinels, never an error.
pub fn build_report(selection: &[&Commit]) -> AggregateReport {
    let commit_count = selection.len();
    let total_line_count: usize = selection.iter().map(|c| c.total_lines()).sum();

    let mut files: HashSet<&str> = HashSet::new();
    let mut has_file_data = false;
    let mut languages: HashMap<&str, usize> = HashMap::new();
    let mut period_counts = [0usize; 4];

    for commit in selection {
        for record in commit.records() {
            if let Some(file) = &record.file {
                has_file_data = true;
                files.insert(file);
            }
            if let Some(language) = &record.language {
                *languages.entry(language).or_insert(0) += 1;
            }
            period_counts[Period::from_hour(record.datetime.hour()) as usize] += 1;
        }
    }

    // None, not zero: datasets in the older log format lack file data.
    let file_count = has_file_data.then(|| files.len());

    let mut languages: Vec<LanguageSlice> = languages
        .into_iter()
        .map(|(language, count)| LanguageSlice {
            language: language.to_string(),
            count,
            proportion: if total_line_count > 0 {
                count as f64 / total_line_count as f64
            } else {
                0.0
            },
        })
        .collect();
    languages.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.language.cmp(&b.language))
    });

    // Strict comparison keeps the earliest bucket on ties.
    let mut most_productive = None;
    let mut best = 0usize;
    for period in Period::ALL {
        let count = period_counts[period as usize];
        if count > best {
            best = count;
            most_productive = Some(period);
        }
    }

    AggregateReport {
        commit_count,
        total_line_count,
        file_count,
        languages,
        most_productive,
    }
}
