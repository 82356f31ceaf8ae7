use std::io::Cursor;

use chrono::{DateTime, Timelike};
use pretty_assertions::assert_eq;

use punchcard::cli::CommitColumnArg;
use punchcard::commits::aggregate_commits;
use punchcard::coordinator::UpdateCoordinator;
use punchcard::filter::{BrushRect, FilterEngine, FilterMode};
use punchcard::ingest::read_records;
use punchcard::model::{AggregateReport, Commit, Period};
use punchcard::render::Renderer;
use punchcard::report::build_report;
use punchcard::scale::ScaleSet;
use punchcard::tui::layout::cell_to_plot;

const SCENARIO_CSV: &str = "\
commit,author,datetime,date,time,timezone,file,line,depth,length,type
a1,Alice,2024-01-01 08:00:00,2024-01-01,08:00:00,+00:00,src/main.js,1,0,40,js
a1,Alice,2024-01-01 08:00:00,2024-01-01,08:00:00,+00:00,src/main.js,2,1,32,js
b2,Bob,2024-01-02 20:00:00,2024-01-02,20:00:00,+00:00,style.css,1,0,18,css
";

fn utc() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(0).unwrap()
}

fn load(csv: &str) -> Vec<Commit> {
    let outcome = read_records(Cursor::new(csv), CommitColumnArg::Auto, utc(), true).unwrap();
    aggregate_commits(outcome.records, None)
}

#[test]
fn scenario_three_rows_two_commits() {
    let commits = load(SCENARIO_CSV);
    assert_eq!(commits.len(), 2);

    let a1 = &commits[0];
    assert_eq!(a1.id, "a1");
    assert_eq!(a1.author, "Alice");
    assert_eq!(a1.total_lines(), 2);
    assert_eq!(a1.hour_frac, 8.0);

    let b2 = &commits[1];
    assert_eq!(b2.id, "b2");
    assert_eq!(b2.total_lines(), 1);
    assert_eq!(b2.hour_frac, 20.0);

    // One Morning record vs one Evening record: the tie resolves to the
    // earlier bucket in enumeration order.
    let selection: Vec<&Commit> = commits.iter().collect();
    let report = build_report(&selection);
    assert_eq!(report.most_productive, Some(Period::Morning));
}

#[test]
fn line_totals_sum_to_well_formed_record_count() {
    let csv = "\
commit,author,datetime,date,time,timezone,file,line,depth,length,type
a1,Alice,2024-01-01 08:00:00,2024-01-01,08:00:00,+00:00,a.js,1,0,40,js
a1,Alice,2024-01-01 08:00:00,2024-01-01,08:00:00,+00:00,a.js,oops,0,40,js
b2,Bob,2024-01-02 20:00:00,2024-01-02,20:00:00,+00:00,b.css,1,0,18,css
";
    let outcome = read_records(Cursor::new(csv), CommitColumnArg::Auto, utc(), true).unwrap();
    assert_eq!(outcome.skipped, 1);
    let well_formed = outcome.records.len();

    let commits = aggregate_commits(outcome.records, None);
    let total: usize = commits.iter().map(|c| c.total_lines()).sum();
    assert_eq!(total, well_formed);
}

#[test]
fn hour_fraction_stays_in_range() {
    let csv = "\
commit,author,datetime,date,time,timezone,file,line,depth,length,type
a,A,2024-03-01 00:00:00,2024-03-01,00:00:00,+00:00,a.js,1,0,1,js
b,B,2024-03-01 23:59:00,2024-03-01,23:59:00,+00:00,a.js,1,0,1,js
c,C,2024-03-02 12:30:00,2024-03-02,12:30:00,+05:30,a.js,1,0,1,js
";
    for commit in load(csv) {
        assert!(commit.hour_frac >= 0.0 && commit.hour_frac < 24.0);
    }
}

#[test]
fn timestamp_fallbacks() {
    // Garbage datetime with a usable date column falls back to midnight;
    // both unusable drops the row entirely.
    let csv = "\
commit,author,datetime,date,time,timezone,file,line,depth,length,type
a1,Alice,not-a-time,2024-01-05,,+00:00,a.js,1,0,4,js
b2,Bob,not-a-time,also-bad,,+00:00,a.js,1,0,4,js
";
    let outcome = read_records(Cursor::new(csv), CommitColumnArg::Auto, utc(), true).unwrap();
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.skipped, 1);
    let record = &outcome.records[0];
    assert_eq!(record.datetime.hour(), 0);
    assert_eq!(record.date.to_string(), "2024-01-05");
}

#[test]
fn commit_hash_header_variant_resolves() {
    let csv = "\
commit_hash,author,datetime,date,time,timezone,file,line,depth,length,type
deadbeef,Alice,2024-01-01 08:00:00,2024-01-01,08:00:00,+00:00,a.js,1,0,4,js
";
    let commits = load(csv);
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].id, "deadbeef");
}

#[test]
fn explicit_commit_column_mismatch_fails() {
    let outcome = read_records(
        Cursor::new(SCENARIO_CSV),
        CommitColumnArg::CommitHash,
        utc(),
        true,
    );
    assert!(outcome.is_err());
}

#[test]
fn repo_url_derives_commit_links() {
    let outcome =
        read_records(Cursor::new(SCENARIO_CSV), CommitColumnArg::Auto, utc(), true).unwrap();
    let commits = aggregate_commits(outcome.records, Some("https://example.com/repo/"));
    assert_eq!(
        commits[0].url.as_deref(),
        Some("https://example.com/repo/commit/a1")
    );
}

#[test]
fn cutoff_at_max_datetime_selects_everything() {
    let commits = load(SCENARIO_CSV);
    let scales = ScaleSet::from_commits(&commits);
    let max = commits.iter().map(|c| c.datetime).max().unwrap();

    let mut engine = FilterEngine::new();
    engine.set_time_cutoff(Some(max));

    let selection = engine.current_selection(&commits, &scales);
    assert_eq!(selection.len(), commits.len());
}

#[test]
fn cutoff_excludes_later_commit() {
    let commits = load(SCENARIO_CSV);
    let scales = ScaleSet::from_commits(&commits);
    let cutoff = DateTime::parse_from_rfc3339("2024-01-01T23:59:00+00:00").unwrap();

    let mut engine = FilterEngine::new();
    engine.set_time_cutoff(Some(cutoff));

    let selection = engine.current_selection(&commits, &scales);
    assert_eq!(selection.len(), 1);
    assert_eq!(selection[0].id, "a1");

    let report = build_report(&selection);
    assert_eq!(report.commit_count, 1);
}

#[test]
fn brush_over_one_commit_selects_it() {
    let commits = load(SCENARIO_CSV);
    let scales = ScaleSet::from_commits(&commits);

    // A rectangle around where a1 plots: x at the domain minimum, y at
    // hour 8 of the inverted hour axis.
    let x = scales.x.map(commits[0].datetime);
    let y = scales.y.map(commits[0].hour_frac);
    let brush = BrushRect::new(x - 10.0, y - 10.0, x + 10.0, y + 10.0);

    let mut engine = FilterEngine::new();
    engine.set_brush(Some(brush));

    let selection = engine.current_selection(&commits, &scales);
    assert_eq!(selection.len(), 1);
    assert_eq!(selection[0].id, "a1");

    let report = build_report(&selection);
    assert_eq!(report.languages.len(), 1);
    assert_eq!(report.languages[0].language, "js");
    assert!((report.languages[0].proportion - 1.0).abs() < 1e-9);
}

#[test]
fn clearing_brush_restores_time_only_filtering() {
    let commits = load(SCENARIO_CSV);
    let scales = ScaleSet::from_commits(&commits);
    let cutoff = commits.iter().map(|c| c.datetime).max().unwrap();

    let mut engine = FilterEngine::new();
    engine.set_time_cutoff(Some(cutoff));
    engine.set_brush(Some(BrushRect::new(0.0, 0.0, 1.0, 1.0)));
    assert_eq!(engine.mode(), FilterMode::BothFiltered);

    engine.clear_brush();
    assert_eq!(engine.mode(), FilterMode::TimeFiltered);

    let selection = engine.current_selection(&commits, &scales);
    assert_eq!(selection.len(), commits.len());
}

#[test]
fn full_area_drag_selects_every_commit() {
    // One commit at the time-domain maximum and one at midnight plot on
    // the right and bottom plot edges; a corner-to-corner drag over the
    // chart must still cover them.
    let csv = "\
commit,author,datetime,date,time,timezone,file,line,depth,length,type
a1,Alice,2024-01-01 00:00:00,2024-01-01,00:00:00,+00:00,a.js,1,0,4,js
b2,Bob,2024-03-01 12:00:00,2024-03-01,12:00:00,+00:00,b.css,1,0,4,css
";
    let commits = load(csv);
    let scales = ScaleSet::from_commits(&commits);

    let area = ratatui::layout::Rect::new(0, 0, 80, 24);
    let (ax, ay) = cell_to_plot(area, 0, 0);
    let (bx, by) = cell_to_plot(area, 79, 23);

    let mut engine = FilterEngine::new();
    engine.set_brush(Some(BrushRect::new(ax, ay, bx, by)));

    let selection = engine.current_selection(&commits, &scales);
    assert_eq!(selection.len(), commits.len());
}

#[test]
fn empty_drag_means_no_brush() {
    let mut engine = FilterEngine::new();
    engine.set_brush(Some(BrushRect::new(50.0, 80.0, 50.0, 200.0)));
    assert_eq!(engine.mode(), FilterMode::Unfiltered);
    assert!(engine.state().brush.is_none());
}

#[test]
fn changing_cutoff_keeps_the_brush() {
    let mut engine = FilterEngine::new();
    let brush = BrushRect::new(100.0, 100.0, 200.0, 200.0);
    engine.set_brush(Some(brush));
    engine.set_time_cutoff(Some(
        DateTime::parse_from_rfc3339("2024-06-01T00:00:00+00:00").unwrap(),
    ));
    assert_eq!(engine.mode(), FilterMode::BothFiltered);
    assert_eq!(engine.state().brush, Some(brush));

    engine.set_time_cutoff(None);
    assert_eq!(engine.mode(), FilterMode::SpatiallyFiltered);
}

#[test]
fn selection_is_idempotent_and_ordered() {
    let commits = load(SCENARIO_CSV);
    let scales = ScaleSet::from_commits(&commits);
    let engine = FilterEngine::new();

    let first: Vec<String> = engine
        .current_selection(&commits, &scales)
        .iter()
        .map(|c| c.id.clone())
        .collect();
    let second: Vec<String> = engine
        .current_selection(&commits, &scales)
        .iter()
        .map(|c| c.id.clone())
        .collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["a1".to_string(), "b2".to_string()]);
}

#[test]
fn language_proportions_sum_to_one() {
    let commits = load(SCENARIO_CSV);
    let selection: Vec<&Commit> = commits.iter().collect();
    let report = build_report(&selection);

    let total: f64 = report.languages.iter().map(|s| s.proportion).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn empty_selection_yields_zeroed_report() {
    let report = build_report(&[]);
    assert_eq!(report, AggregateReport::default());
    assert_eq!(report.commit_count, 0);
    assert_eq!(report.file_count, None);
    assert_eq!(report.most_productive, None);
    assert!(report.languages.is_empty());
}

#[test]
fn missing_file_and_type_columns_report_not_applicable() {
    let csv = "\
commit,author,datetime,date,time,timezone,line,depth,length
a1,Alice,2024-01-01 08:00:00,2024-01-01,08:00:00,+00:00,1,0,40
";
    let commits = load(csv);
    let selection: Vec<&Commit> = commits.iter().collect();
    let report = build_report(&selection);
    assert_eq!(report.file_count, None);
    assert!(report.languages.is_empty());
    assert_eq!(report.total_line_count, 1);
}

// ---------- coordinator / renderer contract ----------

#[derive(Default)]
struct RecordingRenderer {
    calls: Vec<String>,
    highlight: Vec<bool>,
    selection_count: usize,
    report: AggregateReport,
}

impl Renderer for RecordingRenderer {
    fn draw_scatter(&mut self, commits: &[Commit], _scales: &ScaleSet) {
        self.calls.push(format!("scatter:{}", commits.len()));
    }

    fn highlight(&mut self, selected: &[bool]) {
        self.highlight = selected.to_vec();
        self.calls.push("highlight".to_string());
    }

    fn draw_summary(&mut self, report: &AggregateReport) {
        self.report = report.clone();
        self.calls.push("summary".to_string());
    }

    fn set_selection_count(&mut self, count: usize) {
        self.selection_count = count;
        self.calls.push("count".to_string());
    }

    fn set_language_breakdown(&mut self, _report: &AggregateReport) {
        self.calls.push("languages".to_string());
    }
}

#[test]
fn coordinator_refresh_order_keeps_views_consistent() {
    let commits = load(SCENARIO_CSV);
    let mut coordinator = UpdateCoordinator::new(commits, RecordingRenderer::default());

    coordinator.renderer_mut().calls.clear();
    let cutoff = DateTime::parse_from_rfc3339("2024-01-01T23:59:00+00:00").unwrap();
    coordinator.set_time_cutoff(Some(cutoff));

    let renderer = coordinator.renderer();
    assert_eq!(
        renderer.calls,
        vec!["highlight", "count", "summary", "languages"]
    );
    assert_eq!(renderer.highlight, vec![true, false]);
    assert_eq!(renderer.selection_count, 1);
    assert_eq!(renderer.report.commit_count, renderer.selection_count);
}

#[test]
fn cutoff_percent_hundred_selects_everything() {
    let commits = load(SCENARIO_CSV);
    let total = commits.len();
    let mut coordinator = UpdateCoordinator::new(commits, RecordingRenderer::default());

    coordinator.set_cutoff_percent(100);
    assert_eq!(coordinator.selection_indices().len(), total);

    coordinator.set_cutoff_percent(0);
    assert_eq!(coordinator.selection_indices().len(), 1);
}

#[test]
fn empty_dataset_is_not_an_error() {
    let csv = "commit,author,datetime,date,time,timezone,file,line,depth,length,type\n";
    let commits = load(csv);
    assert!(commits.is_empty());

    let mut coordinator = UpdateCoordinator::new(commits, RecordingRenderer::default());
    coordinator.set_cutoff_percent(50);
    assert!(coordinator.selection_indices().is_empty());
    assert_eq!(coordinator.renderer().report, AggregateReport::default());
}
