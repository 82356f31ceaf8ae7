use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::coordinator::UpdateCoordinator;

use super::super::state::{TuiState, ViewModel};
use super::{header_cell, truncate};

/// Render the table of currently selected commits.
pub fn draw_commits_view(
    f: &mut Frame,
    area: Rect,
    coordinator: &UpdateCoordinator<ViewModel>,
    state: &mut TuiState,
) {
    let selection = coordinator.selection_indices();

    let block = Block::default()
        .title(format!(
            "Selected Commits ({}) | j/k navigate, c: copy link, y: copy id",
            selection.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    if selection.is_empty() {
        f.render_widget(Paragraph::new("No commits selected").block(block), area);
        return;
    }

    if state.commit_selected >= selection.len() {
        state.commit_selected = selection.len() - 1;
    }

    let visible_rows = area.height.saturating_sub(3) as usize;
    let start = state
        .commit_selected
        .saturating_sub(visible_rows / 2)
        .min(selection.len().saturating_sub(visible_rows.max(1)));

    let rows: Vec<Row> = selection
        .iter()
        .enumerate()
        .skip(start)
        .take(visible_rows.max(1))
        .map(|(pos, &index)| {
            let commit = &coordinator.commits()[index];
            let author = if commit.author.is_empty() {
                "Unknown"
            } else {
                &commit.author
            };
            let style = if pos == state.commit_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(commit.short_id().to_string()),
                Cell::from(truncate(author, 24)),
                Cell::from(commit.datetime.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(format!("{:>5}", commit.total_lines())),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(26),
            Constraint::Length(18),
            Constraint::Length(7),
        ],
    )
    .header(Row::new([
        header_cell("Commit", Color::Yellow),
        header_cell("Author", Color::Magenta),
        header_cell("When", Color::Cyan),
        header_cell("Lines", Color::Green),
    ]))
    .block(block);

    f.render_widget(table, area);
}
