//! Budget view
//!
//! Title, draft input and the list of amounts, newest-fetched last in the
//! service response and therefore first on screen.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::app::{App, InputMode, LoadState};

/// Render the title bar
pub fn render_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Budgets")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(title, area);
}

/// Render the draft amount input
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Cyan } else { Color::White };
    let title = if editing {
        " Add Budget (Enter to send, Esc to cancel) "
    } else {
        " Add Budget (a to edit) "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.draft, inner);
}

/// Render the budget list
pub fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.input_mode == InputMode::Normal;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::White }));

    if app.budgets().is_empty() {
        let (text, color) = match &app.load_state {
            LoadState::Idle | LoadState::Loading => ("Loading budgets...".to_string(), Color::DarkGray),
            LoadState::Loaded => ("No budgets yet.".to_string(), Color::DarkGray),
            LoadState::Errored(message) => (format!("Failed to load budgets: {}", message), Color::Red),
        };
        let placeholder = Paragraph::new(text)
            .style(Style::default().fg(color))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .display_order()
        .map(|record| ListItem::new(record.amount_label()))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(app.selected_index());

    frame.render_stateful_widget(list, area, &mut state);
}
