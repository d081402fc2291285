//! Terminal user interface built on ratatui

mod app;
mod components;
mod events;
mod keys;
mod pages;
mod styles;

use crate::api::DataSource;
use crate::config::Config;
use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use app::App;
use events::EventHandler;

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

/// Set while raw mode and the alternate screen are on
static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Initialize the terminal for TUI mode
pub fn init_terminal(mouse: bool) -> Result<Terminal<Backend>> {
    TERMINAL_ACTIVE.store(true, Ordering::SeqCst);
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    TERMINAL_ACTIVE.store(false, Ordering::SeqCst);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Best-effort terminal reset for paths that cannot unwind, such as the panic
/// hook. Does nothing unless the console has the terminal. Returns whether a
/// reset was attempted.
pub fn reset_terminal() -> bool {
    if !TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        return false;
    }
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, crossterm::cursor::Show);
    true
}

/// Main TUI entry point
pub async fn run(config: Config, api: Arc<dyn DataSource>) -> Result<()> {
    // Load data before touching the terminal so start-up errors print normally
    let mut app = App::new(config.clone(), api).await?;

    let mut terminal = init_terminal(config.mouse_enabled)?;
    let mut event_handler = EventHandler::new(Duration::from_millis(config.tick_rate_ms));

    let result = run_app(&mut terminal, &mut app, &mut event_handler).await;

    restore_terminal(&mut terminal)?;
    info!("Console closed");
    result
}

/// Main application loop
async fn run_app(terminal: &mut Terminal<Backend>, app: &mut App, event_handler: &mut EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        match event_handler.next().await {
            Some(event) => {
                if app.handle_event(event).await? {
                    break; // Exit requested
                }
            }
            None => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_is_a_no_op_without_console() {
        // One-shot commands never switch the terminal, so there is nothing to undo
        assert!(!reset_terminal());
    }
}
