use chrono::{DateTime, FixedOffset};

use crate::model::Commit;
use crate::scale::ScaleSet;

/// Axis-aligned brush rectangle in virtual plot-pixel space, normalized so
/// `x0 <= x1` and `y0 <= y1`. Containment is inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    pub fn new(ax: f64, ay: f64, bx: f64, by: f64) -> BrushRect {
        BrushRect {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }

    /// A zero-area drag means "no spatial constraint", not "select nothing".
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }
}

/// The session's single mutable filter state: a temporal cutoff and a
/// spatial brush, independently optional and orthogonal.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub time_cutoff: Option<DateTime<FixedOffset>>,
    pub brush: Option<BrushRect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Unfiltered,
    TimeFiltered,
    SpatiallyFiltered,
    BothFiltered,
}

#[derive(Debug, Default)]
pub struct FilterEngine {
    state: FilterState,
}

impl FilterEngine {
    pub fn new() -> FilterEngine {
        FilterEngine::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn mode(&self) -> FilterMode {
        match (self.state.time_cutoff.is_some(), self.state.brush.is_some()) {
            (false, false) => FilterMode::Unfiltered,
            (true, false) => FilterMode::TimeFiltered,
            (false, true) => FilterMode::SpatiallyFiltered,
            (true, true) => FilterMode::BothFiltered,
        }
    }

    /// Never touches the brush.
    pub fn set_time_cutoff(&mut self, cutoff: Option<DateTime<FixedOffset>>) {
        self.state.time_cutoff = cutoff;
    }

    /// Never touches the time cutoff. An empty rectangle (aborted or
    /// degenerate drag) is coerced to no brush at all.
    pub fn set_brush(&mut self, brush: Option<BrushRect>) {
        self.state.brush = brush.filter(|b| !b.is_empty());
    }

    pub fn clear_brush(&mut self) {
        self.state.brush = None;
    }

    /// The composed predicate: inside the time cutoff (when active) and
    /// inside the brush rectangle (when active), mapped through the scales.
    pub fn is_selected(&self, commit: &Commit, scales: &ScaleSet) -> bool {
        if let Some(cutoff) = self.state.time_cutoff {
            if commit.datetime > cutoff {
                return false;
            }
        }
        if let Some(brush) = self.state.brush {
            let x = scales.x.map(commit.datetime);
            let y = scales.y.map(commit.hour_frac);
            if !brush.contains(x, y) {
                return false;
            }
        }
        true
    }

    /// Ordered, stable subsequence of commits satisfying the predicate.
    pub fn current_selection<'a>(
        &self,
        commits: &'a [Commit],
        scales: &ScaleSet,
    ) -> Vec<&'a Commit> {
        commits
            .iter()
            .filter(|c| self.is_selected(c, scales))
            .collect()
    }

    /// Per-commit selection flags aligned with the input order, for
    /// highlight rendering.
    pub fn selection_flags(&self, commits: &[Commit], scales: &ScaleSet) -> Vec<bool> {
        commits
            .iter()
            .map(|c| self.is_selected(c, scales))
            .collect()
    }
}
