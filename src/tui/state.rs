use std::time::Instant;

use ratatui::layout::Rect;

use crate::model::{AggregateReport, Commit, LanguageSlice};
use crate::render::Renderer;
use crate::scale::ScaleSet;

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    Scatter,
    Summary,
    Languages,
    Commits,
}

pub struct TuiState {
    pub view_mode: ViewMode,
    pub tab_index: usize,
    pub show_help: bool,
    /// Normalized slider position; 100 equals the time domain maximum.
    pub cutoff_percent: u8,
    /// Cell where the active brush drag started.
    pub drag_anchor: Option<(u16, u16)>,
    /// Inner chart area from the last frame, for mapping mouse cells.
    pub chart_area: Option<Rect>,
    /// Cursor into the current selection in the commits view.
    pub commit_selected: usize,
    pub status_message: Option<(String, Instant)>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Scatter,
            tab_index: 0,
            show_help: false,
            cutoff_percent: 100,
            drag_anchor: None,
            chart_area: None,
            commit_selected: 0,
            status_message: None,
        }
    }
}

impl TuiState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }
}

/// What the frame loop draws from. The coordinator pushes updates through
/// the [`Renderer`] trait; the views only ever read this model.
#[derive(Default)]
pub struct ViewModel {
    /// One `(unix seconds, hour fraction)` point per commit, in commit order.
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub highlight: Vec<bool>,
    pub selection_count: usize,
    pub report: AggregateReport,
    pub languages: Vec<LanguageSlice>,
}

impl Renderer for ViewModel {
    fn draw_scatter(&mut self, commits: &[Commit], scales: &ScaleSet) {
        self.points = commits
            .iter()
            .map(|c| (c.datetime.timestamp() as f64, c.hour_frac))
            .collect();
        let (t0, t1) = scales.x.domain();
        self.x_bounds = [t0.timestamp() as f64, t1.timestamp() as f64];
    }

    fn highlight(&mut self, selected: &[bool]) {
        self.highlight = selected.to_vec();
    }

    fn draw_summary(&mut self, report: &AggregateReport) {
        self.report = report.clone();
    }

    fn set_selection_count(&mut self, count: usize) {
        self.selection_count = count;
    }

    fn set_language_breakdown(&mut self, report: &AggregateReport) {
        self.languages = report.languages.clone();
    }
}
