use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::coordinator::UpdateCoordinator;
use crate::util::percent_label;

use super::super::state::ViewModel;
use super::{header_cell, proportion_bar};

/// Render the per-language line breakdown of the current selection.
pub fn draw_languages_view(f: &mut Frame, area: Rect, coordinator: &UpdateCoordinator<ViewModel>) {
    let vm = coordinator.renderer();

    let block = Block::default()
        .title(format!(
            "Language Breakdown | {} selected commits",
            vm.selection_count
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    if vm.languages.is_empty() {
        f.render_widget(Paragraph::new("N/A (no type data)").block(block), area);
        return;
    }

    let rows: Vec<Row> = vm
        .languages
        .iter()
        .map(|slice| {
            Row::new(vec![
                Cell::from(slice.language.clone()).style(Style::default().fg(Color::Cyan)),
                Cell::from(format!("{:>6}", slice.count)),
                Cell::from(percent_label(slice.proportion))
                    .style(Style::default().fg(Color::Yellow)),
                Cell::from(proportion_bar(slice.proportion))
                    .style(Style::default().fg(Color::Magenta)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Percentage(100),
        ],
    )
    .header(Row::new([
        header_cell("Language", Color::Cyan),
        header_cell("Lines", Color::Green),
        header_cell("Share", Color::Yellow),
        header_cell("", Color::White),
    ]))
    .block(block);

    f.render_widget(table, area);
}
