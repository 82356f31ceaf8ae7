use crate::model::{AggregateReport, Commit};
use crate::scale::ScaleSet;

/// The external drawing collaborator. The core pipeline calls these and
/// never reaches into drawing internals; the interactive terminal view and
/// the test double are the two implementations.
pub trait Renderer {
    /// Redraw the scatter marks for the full commit set. Called on dataset
    /// load and again whenever the scales are re-domained.
    fn draw_scatter(&mut self, commits: &[Commit], scales: &ScaleSet);

    /// Update the highlight state of the marks; `selected` is aligned with
    /// the commit order passed to [`Renderer::draw_scatter`].
    fn highlight(&mut self, selected: &[bool]);

    fn draw_summary(&mut self, report: &AggregateReport);

    fn set_selection_count(&mut self, count: usize);

    fn set_language_breakdown(&mut self, report: &AggregateReport);
}
