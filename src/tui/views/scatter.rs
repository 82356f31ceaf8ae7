use chrono::DateTime;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph};
use ratatui::Frame;

use crate::coordinator::UpdateCoordinator;
use crate::filter::FilterMode;
use crate::util::hour_label;

use super::super::layout::plot_to_cell_rect;
use super::super::state::{TuiState, ViewModel};

/// Render the commits scatter plot (time vs time-of-day) with the brush
/// overlay and the cutoff slider.
pub fn draw_scatter_view(
    f: &mut Frame,
    area: Rect,
    coordinator: &UpdateCoordinator<ViewModel>,
    state: &mut TuiState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let vm = coordinator.renderer();
    let total = coordinator.commits().len();

    let title = match coordinator.engine().mode() {
        FilterMode::Unfiltered => format!("Commits by Time of Day | {total} commits"),
        _ => format!(
            "Commits by Time of Day | {} of {total} selected",
            vm.selection_count
        ),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(chunks[0]);
    state.chart_area = Some(inner);

    if vm.points.is_empty() {
        state.chart_area = None;
        f.render_widget(Paragraph::new("No data").block(block), chunks[0]);
        draw_cutoff_gauge(f, chunks[1], coordinator, state);
        return;
    }

    let mut selected_points = Vec::new();
    let mut unselected_points = Vec::new();
    for (i, point) in vm.points.iter().enumerate() {
        if vm.highlight.get(i).copied().unwrap_or(true) {
            selected_points.push(*point);
        } else {
            unselected_points.push(*point);
        }
    }

    let datasets = vec![
        Dataset::default()
            .name("filtered out")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::DarkGray))
            .data(&unselected_points),
        Dataset::default()
            .name("selected")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&selected_points),
    ];

    let x_labels = x_axis_labels(vm.x_bounds);
    let y_labels: Vec<Span> = [0u32, 6, 12, 18, 24]
        .iter()
        .map(|h| Span::from(hour_label(*h)))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(vm.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 24.0])
                .labels(y_labels),
        );
    f.render_widget(chart, chunks[0]);

    if let Some(brush) = coordinator.engine().state().brush {
        if let Some(rect) = plot_to_cell_rect(inner, &brush) {
            f.render_widget(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
                rect,
            );
        }
    }

    draw_cutoff_gauge(f, chunks[1], coordinator, state);
}

fn draw_cutoff_gauge(
    f: &mut Frame,
    area: Rect,
    coordinator: &UpdateCoordinator<ViewModel>,
    state: &TuiState,
) {
    let cutoff = coordinator.scales().x.at_percent(state.cutoff_percent);
    let label = format!(
        "{} ({}%)",
        cutoff.format("%Y-%m-%d %H:%M"),
        state.cutoff_percent
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Time Cutoff  ←/→ adjust, Home/End, u: clear")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .percent(u16::from(state.cutoff_percent))
        .label(label);
    f.render_widget(gauge, area);
}

fn x_axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let format = |ts: f64| -> String {
        DateTime::from_timestamp(ts as i64, 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    vec![
        Span::from(format(bounds[0])),
        Span::from(format((bounds[0] + bounds[1]) / 2.0)),
        Span::from(format(bounds[1])),
    ]
}
