use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::coordinator::UpdateCoordinator;

use super::super::state::ViewModel;

/// Render the aggregate panel for the current selection.
pub fn draw_summary_view(f: &mut Frame, area: Rect, coordinator: &UpdateCoordinator<ViewModel>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let vm = coordinator.renderer();
    let report = &vm.report;
    let total = coordinator.commits().len();

    let mut lines = vec![
        Line::from(vec![Span::styled(
            "Selection Summary",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];

    if report.commit_count == 0 {
        lines.push(Line::from("No data"));
    } else {
        lines.push(stat_line("Total commits: ", report.commit_count.to_string(), Color::Green));
        lines.push(stat_line(
            "Total lines: ",
            report.total_line_count.to_string(),
            Color::Cyan,
        ));
        lines.push(stat_line(
            "Files touched: ",
            report
                .file_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            Color::Cyan,
        ));
        lines.push(stat_line(
            "Most productive time of day: ",
            report
                .most_productive
                .map(|p| p.label().to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            Color::Magenta,
        ));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Summary")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(panel, chunks[0]);

    let ratio = if total > 0 {
        (report.commit_count as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Selected share of dataset")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .percent(ratio as u16)
        .label(format!("{}/{} commits", report.commit_count, total));
    f.render_widget(gauge, chunks[1]);
}

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(Color::White)),
        Span::styled(value, Style::default().fg(color)),
    ])
}
