use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::coordinator::UpdateCoordinator;
use crate::filter::BrushRect;
use crate::model::Commit;

use super::layout::{cell_to_plot, in_area};
use super::state::{TuiState, ViewMode, ViewModel};

/// Handle a keyboard event, mutating state and returning `true` if the loop
/// should exit.
pub fn handle_key_events(
    key_event: KeyEvent,
    state: &mut TuiState,
    coordinator: &mut UpdateCoordinator<ViewModel>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1) | KeyCode::Char('q')) {
            state.show_help = false;
        }
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Tab => state.tab_index = (state.tab_index + 1) % 4,
        KeyCode::BackTab => {
            state.tab_index = if state.tab_index == 0 {
                3
            } else {
                state.tab_index - 1
            };
        }
        KeyCode::Left => adjust_cutoff(state, coordinator, -1),
        KeyCode::Right => adjust_cutoff(state, coordinator, 1),
        KeyCode::PageUp => {
            if state.view_mode == ViewMode::Commits {
                state.commit_selected = state.commit_selected.saturating_sub(10);
            } else {
                adjust_cutoff(state, coordinator, 10);
            }
        }
        KeyCode::PageDown => {
            if state.view_mode == ViewMode::Commits {
                move_commit_cursor(state, coordinator, 10);
            } else {
                adjust_cutoff(state, coordinator, -10);
            }
        }
        KeyCode::Home => {
            if state.view_mode == ViewMode::Commits {
                state.commit_selected = 0;
            } else {
                set_cutoff(state, coordinator, 0);
            }
        }
        KeyCode::End => {
            if state.view_mode == ViewMode::Commits {
                state.commit_selected = coordinator
                    .selection_indices()
                    .len()
                    .saturating_sub(1);
            } else {
                set_cutoff(state, coordinator, 100);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.commit_selected = state.commit_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => move_commit_cursor(state, coordinator, 1),
        KeyCode::Char('u') => {
            // Unbind the cutoff entirely, which is equivalent to 100%.
            state.cutoff_percent = 100;
            coordinator.set_time_cutoff(None);
            state.set_status("Cutoff cleared");
        }
        KeyCode::Char('b') | KeyCode::Esc => {
            if coordinator.engine().state().brush.is_some() {
                coordinator.clear_brush();
                state.set_status("Brush cleared");
            }
        }
        KeyCode::Char('z') => {
            coordinator.zoom_to_selection();
            state.set_status("Zoomed to selection");
        }
        KeyCode::Char('r') => {
            coordinator.reset_zoom();
            state.set_status("Zoom reset");
        }
        KeyCode::Char('c') => copy_commit_link(state, coordinator),
        KeyCode::Char('y') => copy_commit_short_id(state, coordinator),
        _ => {}
    }

    false
}

/// Handle mouse interaction: scroll navigation in the commits view and the
/// brush drag gesture over the chart area.
pub fn handle_mouse_event(
    mouse_event: MouseEvent,
    state: &mut TuiState,
    coordinator: &mut UpdateCoordinator<ViewModel>,
) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => {
            state.commit_selected = state.commit_selected.saturating_sub(1);
        }
        MouseEventKind::ScrollDown => move_commit_cursor(state, coordinator, 1),
        MouseEventKind::Down(MouseButton::Left) => {
            if state.view_mode == ViewMode::Scatter {
                if let Some(area) = state.chart_area {
                    if in_area(area, mouse_event.column, mouse_event.row) {
                        state.drag_anchor = Some((mouse_event.column, mouse_event.row));
                    }
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            apply_drag(state, coordinator, mouse_event.column, mouse_event.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            // A release on the anchor cell produces an empty rectangle,
            // which the engine treats as "no brush".
            apply_drag(state, coordinator, mouse_event.column, mouse_event.row);
            state.drag_anchor = None;
        }
        _ => {}
    }
}

fn apply_drag(
    state: &mut TuiState,
    coordinator: &mut UpdateCoordinator<ViewModel>,
    column: u16,
    row: u16,
) {
    let (Some(anchor), Some(area)) = (state.drag_anchor, state.chart_area) else {
        return;
    };
    let (ax, ay) = cell_to_plot(area, anchor.0, anchor.1);
    let (bx, by) = cell_to_plot(area, column, row);
    coordinator.set_brush(Some(BrushRect::new(ax, ay, bx, by)));
}

fn adjust_cutoff(
    state: &mut TuiState,
    coordinator: &mut UpdateCoordinator<ViewModel>,
    delta: i16,
) {
    let percent = (i16::from(state.cutoff_percent) + delta).clamp(0, 100) as u8;
    set_cutoff(state, coordinator, percent);
}

fn set_cutoff(state: &mut TuiState, coordinator: &mut UpdateCoordinator<ViewModel>, percent: u8) {
    state.cutoff_percent = percent;
    coordinator.set_cutoff_percent(percent);
}

fn move_commit_cursor(
    state: &mut TuiState,
    coordinator: &UpdateCoordinator<ViewModel>,
    delta: usize,
) {
    let len = coordinator.selection_indices().len();
    if len > 0 {
        state.commit_selected = (state.commit_selected + delta).min(len - 1);
    }
}

fn selected_commit<'a>(
    state: &TuiState,
    coordinator: &'a UpdateCoordinator<ViewModel>,
) -> Option<&'a Commit> {
    let index = *coordinator
        .selection_indices()
        .get(state.commit_selected)?;
    coordinator.commits().get(index)
}

/// Copy the commit link (or the bare id when no repository URL is
/// configured), surfacing clipboard errors in the status line.
fn copy_commit_link(state: &mut TuiState, coordinator: &UpdateCoordinator<ViewModel>) {
    let Some(commit) = selected_commit(state, coordinator) else {
        return;
    };
    let text = commit.url.clone().unwrap_or_else(|| commit.id.clone());
    let short = commit.short_id().to_string();
    match copy_to_clipboard(&text) {
        Ok(_) => state.set_status(format!("Copied link for {short}")),
        Err(err) => state.set_status(format!("Clipboard error: {err}")),
    }
}

fn copy_commit_short_id(state: &mut TuiState, coordinator: &UpdateCoordinator<ViewModel>) {
    let Some(commit) = selected_commit(state, coordinator) else {
        return;
    };
    let short = commit.short_id().to_string();
    match copy_to_clipboard(&short) {
        Ok(_) => state.set_status(format!("Copied: {short}")),
        Err(err) => state.set_status(format!("Clipboard error: {err}")),
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    arboard::Clipboard::new()?.set_text(text.to_string())
}
