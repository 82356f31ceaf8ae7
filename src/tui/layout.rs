use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::filter::BrushRect;
use crate::scale::USABLE;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn in_area(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

/// Map a terminal cell inside (or clamped into) the chart area onto the
/// virtual plot-pixel space the scales and the brush live in.
///
/// The mapping spans the whole inner area and does not subtract the axis
/// label gutter `Chart` reserves, so near the axes the overlay is off by up
/// to a cell. The first and last cells map to the exact plot edges, so a
/// corner-to-corner drag covers the full usable space.
pub fn cell_to_plot(area: Rect, column: u16, row: u16) -> (f64, f64) {
    let max_col = area.x + area.width.saturating_sub(1);
    let max_row = area.y + area.height.saturating_sub(1);
    let column = column.clamp(area.x, max_col);
    let row = row.clamp(area.y, max_row);

    let fx = f64::from(column - area.x) / f64::from(area.width.saturating_sub(1).max(1));
    let fy = f64::from(row - area.y) / f64::from(area.height.saturating_sub(1).max(1));

    (
        USABLE.left + fx * (USABLE.right - USABLE.left),
        USABLE.top + fy * (USABLE.bottom - USABLE.top),
    )
}

/// Project a plot-space brush rectangle back onto terminal cells for the
/// overlay; at least one cell wide/tall so a thin brush stays visible.
pub fn plot_to_cell_rect(area: Rect, brush: &BrushRect) -> Option<Rect> {
    if area.width == 0 || area.height == 0 {
        return None;
    }

    let fx0 = ((brush.x0 - USABLE.left) / (USABLE.right - USABLE.left)).clamp(0.0, 1.0);
    let fx1 = ((brush.x1 - USABLE.left) / (USABLE.right - USABLE.left)).clamp(0.0, 1.0);
    let fy0 = ((brush.y0 - USABLE.top) / (USABLE.bottom - USABLE.top)).clamp(0.0, 1.0);
    let fy1 = ((brush.y1 - USABLE.top) / (USABLE.bottom - USABLE.top)).clamp(0.0, 1.0);

    let x = area.x + (fx0 * f64::from(area.width)) as u16;
    let y = area.y + (fy0 * f64::from(area.height)) as u16;
    let x_end = area.x + (fx1 * f64::from(area.width)).ceil() as u16;
    let y_end = area.y + (fy1 * f64::from(area.height)).ceil() as u16;

    let width = x_end.saturating_sub(x).max(1);
    let height = y_end.saturating_sub(y).max(1);
    let width = width.min(area.x + area.width - x);
    let height = height.min(area.y + area.height - y);

    Some(Rect::new(x, y, width, height))
}
