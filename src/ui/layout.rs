//! Layout helpers and the status bar

use crate::app::App;
use crate::state::{FormStage, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the content column gets on large terminals
pub const CONTENT_WIDTH: u16 = 72;

/// Create the main layout: content area above a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Horizontally centered column at most `width` wide
pub fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    // View-specific hints
    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:salir ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> &'static str {
    match app.state.current_view {
        View::Landing => "Enter:ver si califico  j/k:desplazar  p:privacidad  t:términos  q:salir",
        View::Privacy | View::Terms => "j/k:desplazar  Esc:volver",
        View::Form if app.form.is_submitting() => "Enviando...",
        View::Form => match app.form.stage() {
            FormStage::Location => "0-9:escribir  Enter:continuar  Esc:volver",
            FormStage::AgeRange => "j/k:mover  Enter/número:elegir  Esc:atrás",
            FormStage::Contact => "Tab:cambiar campo  Enter:enviar  Esc:atrás",
            FormStage::Success => "Enter:volver al inicio",
        },
    }
}
