use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::{Frame, Terminal};

use crate::cli::CommonArgs;
use crate::commits::aggregate_commits;
use crate::coordinator::UpdateCoordinator;
use crate::ingest::load_records;

use super::events::{handle_key_events, handle_mouse_event};
use super::state::{TuiState, ViewMode, ViewModel};
use super::views::{
    draw_commits_view, draw_help_overlay, draw_languages_view, draw_scatter_view,
    draw_summary_view,
};

pub fn run(common: &CommonArgs, input: &Path) -> anyhow::Result<()> {
    let outcome = load_records(
        input,
        common.commit_column,
        common.default_offset()?,
        false,
    )
    .context("Failed to load line records")?;
    let skipped = outcome.skipped;

    let commits = aggregate_commits(outcome.records, common.repo_url.as_deref());
    let coordinator = UpdateCoordinator::new(commits, ViewModel::default());

    run_loop(coordinator, skipped).context("Terminal UI failed")
}

fn run_loop(mut coordinator: UpdateCoordinator<ViewModel>, skipped: usize) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut state = TuiState::default();

    if skipped > 0 {
        state.set_status(format!("{skipped} malformed rows skipped during load"));
    }

    terminal.clear()?;

    loop {
        let draw_result = terminal.draw(|f| draw_frame(f, &coordinator, &mut state));
        if let Err(e) = draw_result {
            eprintln!("TUI draw error: {e}");
        }

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_events(key_event, &mut state, &mut coordinator) {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => {
                    handle_mouse_event(mouse_event, &mut state, &mut coordinator);
                }
                _ => {}
            }
        }
    }

    terminal.clear()?;
    execute!(io::stdout(), DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

fn draw_frame(f: &mut Frame, coordinator: &UpdateCoordinator<ViewModel>, state: &mut TuiState) {
    let size = f.size();

    if state.show_help {
        draw_help_overlay(f, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    let tabs = Tabs::new(vec!["Scatter", "Summary", "Languages", "Commits"])
        .block(Block::default().borders(Borders::ALL).title("View Mode"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .select(state.tab_index);
    f.render_widget(tabs, chunks[0]);

    state.view_mode = match state.tab_index {
        0 => ViewMode::Scatter,
        1 => ViewMode::Summary,
        2 => ViewMode::Languages,
        3 => ViewMode::Commits,
        _ => ViewMode::Scatter,
    };

    match state.view_mode {
        ViewMode::Scatter => draw_scatter_view(f, chunks[1], coordinator, state),
        ViewMode::Summary => draw_summary_view(f, chunks[1], coordinator),
        ViewMode::Languages => draw_languages_view(f, chunks[1], coordinator),
        ViewMode::Commits => draw_commits_view(f, chunks[1], coordinator, state),
    }

    if state.view_mode != ViewMode::Scatter {
        state.chart_area = None;
    }

    let status = match &state.status_message {
        Some((message, at)) if at.elapsed() < Duration::from_secs(3) => message.clone(),
        _ => "h: help | Tab: views | ←/→: cutoff | drag: brush | q: quit".to_string(),
    };
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::Gray)),
        chunks[2],
    );
}
