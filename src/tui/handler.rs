//! Event handler for the TUI
//!
//! Routes keyboard events to the handler for the current input mode and
//! request results to the app state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, InputMode};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Api(result) => {
            app.apply(result);
            Ok(())
        }
        Event::Tick => {
            app.tick();
            Ok(())
        }
        Event::Mouse(_) | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.show_help {
        app.show_help = false;
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

/// Handle keys while browsing the list
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => {
            app.set_input_mode(InputMode::Editing)
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Char('x') => app.notifications.dismiss(),
        _ => {}
    }

    Ok(())
}

/// Handle keys while editing the draft amount
fn handle_editing_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => app.set_input_mode(InputMode::Normal),
        KeyCode::Enter => app.submit_draft(),
        KeyCode::Char(c) => {
            app.draft.insert(c);
        }
        KeyCode::Backspace => app.draft.backspace(),
        KeyCode::Delete => app.draft.delete(),
        KeyCode::Left => app.draft.move_left(),
        KeyCode::Right => app.draft.move_right(),
        KeyCode::Home => app.draft.move_start(),
        KeyCode::End => app.draft.move_end(),
        _ => {}
    }

    Ok(())
}
