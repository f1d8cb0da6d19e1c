//! Field rendering for the lead form inputs

use crate::state::LeadField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Rows taken by one input (border + value + border)
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a single-line input with its label as the block title.
///
/// An empty value shows the field's placeholder.
pub fn draw_field(frame: &mut Frame, area: Rect, field: LeadField, value: &str, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = if is_active { "▌" } else { "" };

    let mut spans = Vec::with_capacity(2);
    if value.is_empty() {
        if is_active {
            spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
        spans.push(Span::styled(
            field.placeholder(),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let style = if is_active {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(value, style));
        spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
