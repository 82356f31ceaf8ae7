use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod commits;
mod help;
mod languages;
mod scatter;
mod summary;

pub use commits::draw_commits_view;
pub use help::draw_help_overlay;
pub use languages::draw_languages_view;
pub use scatter::draw_scatter_view;
pub use summary::draw_summary_view;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Truncate a string to `max` chars with an ellipsis when necessary.
/// Counts characters, not bytes, so multi-byte input never splits.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// A fixed-width proportion bar for the language breakdown.
pub(crate) fn proportion_bar(proportion: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((proportion.clamp(0.0, 1.0) * WIDTH as f64).round() as usize).min(WIDTH);
    "█".repeat(filled) + &"░".repeat(WIDTH - filled)
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("Alice", 24), "Alice");
    }

    #[test]
    fn truncate_handles_multibyte_authors() {
        let author = "Åsa Ångström-Söderström";
        let shortened = truncate(author, 21);
        assert!(shortened.ends_with("..."));
        assert_eq!(shortened.chars().count(), 21);
    }
}
