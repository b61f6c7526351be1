//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tracing::info;

use crate::api::BudgetApi;
use crate::config::settings::Settings;

use super::app::{App, ViewOptions};
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic info
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the budget view until the user quits
pub async fn run_tui(api: Arc<dyn BudgetApi>, settings: &Settings) -> Result<()> {
    let options = ViewOptions::from_settings(settings)?;

    let mut terminal = init_terminal()?;
    let mut events = EventHandler::new(settings.tick_rate());
    let mut app = App::new(api, events.sender(), options);

    info!(base_url = %app.options().base_url, "budget view opened");
    app.load();

    let result = event_loop(&mut terminal, &mut app, &mut events).await;

    app.dispose();
    restore_terminal()?;
    info!("budget view closed");

    result
}

async fn event_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| super::views::render(frame, app))?;

        let Some(event) = events.next().await else {
            break;
        };
        handle_event(app, event)?;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
