pub mod render;
pub mod state;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use state::AppState;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Commands the TUI can send back to the orchestrator.
#[derive(Debug, Clone)]
pub enum TuiCommand {
    Quit,
    Refresh,
}

/// Run the TUI. Reads state from `state_rx`, applies UI interactions through
/// `state_tx`, sends orchestrator commands on `cmd_tx`.
pub async fn run_tui(
    state_tx: watch::Sender<AppState>,
    state_rx: watch::Receiver<AppState>,
    cmd_tx: mpsc::Sender<TuiCommand>,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state_tx, state_rx, cmd_tx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state_tx: watch::Sender<AppState>,
    state_rx: watch::Receiver<AppState>,
    cmd_tx: mpsc::Sender<TuiCommand>,
) -> Result<()> {
    loop {
        let state = state_rx.borrow().clone();
        terminal.draw(|f| render::draw(f, &state))?;

        // Poll for keyboard events with 100ms timeout; each pass redraws
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Search input mode captures every key until submit or cancel
        if state.search_input.is_some() {
            match key.code {
                KeyCode::Enter => state_tx.send_modify(|s| {
                    let buffer = s.search_input.take().unwrap_or_default();
                    s.apply_search(&buffer);
                }),
                KeyCode::Esc => state_tx.send_modify(|s| {
                    s.search_input = None;
                }),
                KeyCode::Backspace => state_tx.send_modify(|s| {
                    if let Some(buf) = s.search_input.as_mut() {
                        buf.pop();
                    }
                }),
                KeyCode::Char(c) => state_tx.send_modify(|s| {
                    if let Some(buf) = s.search_input.as_mut() {
                        buf.push(c);
                    }
                }),
                _ => {}
            }
            continue;
        }

        // Detail view open: clicking anywhere closes it, keyboard equivalent
        if state.detail_open {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    state_tx.send_modify(|s| s.detail_open = false);
                }
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') => {
                let _ = cmd_tx.send(TuiCommand::Quit).await;
                return Ok(());
            }
            KeyCode::Char('/') => {
                state_tx.send_modify(|s| s.search_input = Some(String::new()));
            }
            KeyCode::Char('r') => {
                state_tx.send_modify(|s| s.reset_search());
            }
            KeyCode::Char('R') => {
                let _ = cmd_tx.send(TuiCommand::Refresh).await;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                state_tx.send_modify(|s| s.select_next());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                state_tx.send_modify(|s| s.select_prev());
            }
            KeyCode::Char('g') => {
                state_tx.send_modify(|s| s.select_first());
            }
            KeyCode::Char('G') => {
                state_tx.send_modify(|s| s.select_last());
            }
            KeyCode::Enter => {
                state_tx.send_modify(|s| {
                    if s.selected_card().is_some() {
                        s.detail_open = true;
                    }
                });
            }
            _ => {}
        }
    }
}
