use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::super::layout::centered_rect;

/// Draw the modal help overlay describing navigation, views, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let section = |text: &'static str| {
        Line::from(vec![Span::styled(
            text,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "punchcard - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Filtering:"),
        Line::from("  ←/→         Move the time cutoff by 1%"),
        Line::from("  PgUp/PgDn   Move the time cutoff by 10%"),
        Line::from("  Home/End    Cutoff to 0% / 100%"),
        Line::from("  u           Clear the cutoff"),
        Line::from("  Mouse drag  Brush a region of the scatter plot"),
        Line::from("  b, Esc      Clear the brush"),
        Line::from(""),
        section("Time axis:"),
        Line::from("  z           Zoom to the current selection"),
        Line::from("  r           Reset zoom to the full dataset"),
        Line::from(""),
        section("Views:"),
        Line::from("  Tab         Next view (Scatter/Summary/Languages/Commits)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from(""),
        section("Commits:"),
        Line::from("  j/k or ↑/↓  Move selection"),
        Line::from("  c / y       Copy commit link / short id"),
        Line::from(""),
        section("General:"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
