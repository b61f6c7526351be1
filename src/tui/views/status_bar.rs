//! Status bar view
//!
//! Shows request progress, record count, the service URL and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, InputMode, LoadState, SubmitState};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    let (load_text, load_color) = match &app.load_state {
        LoadState::Idle => ("idle".to_string(), Color::DarkGray),
        LoadState::Loading => ("loading".to_string(), Color::Yellow),
        LoadState::Loaded => (format!("{} budgets", app.budgets().len()), Color::Green),
        LoadState::Errored(_) => ("load failed".to_string(), Color::Red),
    };
    spans.push(Span::styled(
        format!(" {} ", load_text),
        Style::default().fg(load_color).add_modifier(Modifier::BOLD),
    ));

    let submit = match &app.submit_state {
        SubmitState::Idle => None,
        SubmitState::Submitting => Some((format!("adding ({})", app.pending_adds), Color::Yellow)),
        SubmitState::Submitted => Some(("added".to_string(), Color::Green)),
        SubmitState::Errored(_) => Some(("add failed".to_string(), Color::Red)),
    };
    if let Some((text, color)) = submit {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(format!("{} ", text), Style::default().fg(color)));
    }

    spans.push(Span::raw("│ "));
    spans.push(Span::styled(
        app.options().base_url.clone(),
        Style::default().fg(Color::Cyan),
    ));

    let hints = match app.input_mode {
        InputMode::Normal => " q:Quit  a:Add  r:Reload  ?:Help ",
        InputMode::Editing => " Enter:Send  Esc:Done ",
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
