use chrono::{DateTime, FixedOffset};

use crate::filter::{BrushRect, FilterEngine};
use crate::model::Commit;
use crate::render::Renderer;
use crate::report::build_report;
use crate::scale::ScaleSet;

/// Drives every dependent view after a filter change.
///
/// The coordinator is the sole holder of the filter engine, so every
/// mutation necessarily flows through a mutate-then-refresh method here;
/// each one completes the full recompute-report-redraw sequence before
/// returning, which keeps the highlighted marks and the displayed counts
/// mutually consistent even under rapid successive events.
pub struct UpdateCoordinator<R: Renderer> {
    commits: Vec<Commit>,
    scales: ScaleSet,
    engine: FilterEngine,
    renderer: R,
    selection: Vec<usize>,
}

impl<R: Renderer> UpdateCoordinator<R> {
    pub fn new(commits: Vec<Commit>, renderer: R) -> UpdateCoordinator<R> {
        let scales = ScaleSet::from_commits(&commits);
        let mut coordinator = UpdateCoordinator {
            commits,
            scales,
            engine: FilterEngine::new(),
            renderer,
            selection: Vec::new(),
        };
        coordinator
            .renderer
            .draw_scatter(&coordinator.commits, &coordinator.scales);
        coordinator.refresh();
        coordinator
    }

    /// (1) recompute the selection, (2) rebuild the aggregate report,
    /// (3) push highlight, count, and panels to the renderer — in that order.
    fn refresh(&mut self) {
        let flags = self.engine.selection_flags(&self.commits, &self.scales);
        self.selection = flags
            .iter()
            .enumerate()
            .filter_map(|(i, selected)| selected.then_some(i))
            .collect();
        let selected: Vec<&Commit> = self.selection.iter().map(|&i| &self.commits[i]).collect();
        let report = build_report(&selected);

        self.renderer.highlight(&flags);
        self.renderer.set_selection_count(selected.len());
        self.renderer.draw_summary(&report);
        self.renderer.set_language_breakdown(&report);
    }

    pub fn set_time_cutoff(&mut self, cutoff: Option<DateTime<FixedOffset>>) {
        self.engine.set_time_cutoff(cutoff);
        self.refresh();
    }

    /// Apply a normalized 0-100 slider position as the time cutoff,
    /// inverse-mapped through the time scale's domain.
    pub fn set_cutoff_percent(&mut self, percent: u8) {
        let cutoff = self.scales.x.at_percent(percent);
        self.set_time_cutoff(Some(cutoff));
    }

    pub fn set_brush(&mut self, brush: Option<BrushRect>) {
        self.engine.set_brush(brush);
        self.refresh();
    }

    pub fn clear_brush(&mut self) {
        self.engine.clear_brush();
        self.refresh();
    }

    /// Narrow the time axis to the current selection's span, then redraw.
    pub fn zoom_to_selection(&mut self) {
        let times: Vec<_> = self
            .selection
            .iter()
            .map(|&i| self.commits[i].datetime)
            .collect();
        self.scales.x.redomain(times);
        self.renderer.draw_scatter(&self.commits, &self.scales);
        self.refresh();
    }

    /// Restore the time axis to the full dataset span, then redraw.
    pub fn reset_zoom(&mut self) {
        let times: Vec<_> = self.commits.iter().map(|c| c.datetime).collect();
        self.scales.x.redomain(times);
        self.renderer.draw_scatter(&self.commits, &self.scales);
        self.refresh();
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    /// Indices into `commits()` of the current selection, in stable order.
    pub fn selection_indices(&self) -> &[usize] {
        &self.selection
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
