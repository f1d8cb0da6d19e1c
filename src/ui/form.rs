//! Multi-step lead form rendering

use super::components::{render_button, BUTTON_HEIGHT};
use super::field_renderer::{draw_field, FIELD_HEIGHT};
use super::layout::centered_column;
use crate::app::App;
use crate::state::{ContactFocus, FormStage, LeadField};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

/// Form column width
const FORM_WIDTH: u16 = 56;

const FOOTER: &str =
    "Tu información está protegida y nunca será compartida sin tu consentimiento.";

const TESTIMONIAL: &str =
    "\"Me explicaron todo en español y sin presión. Ahora sé que mi retiro y mi familia están protegidos.\"";

/// Draw the form view
pub fn draw(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let column = centered_column(area, FORM_WIDTH);
    let is_success = app.form.stage() == FormStage::Success;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Progress bar
            Constraint::Length(1), // Back hint + step indicators
            Constraint::Length(1), // Spacer
            Constraint::Length(if app.form.error_message().is_some() { 3 } else { 0 }),
            Constraint::Min(0),    // Stage content
            Constraint::Length(2), // Footer
        ])
        .split(column);

    draw_progress(frame, chunks[0], app, now);
    if !is_success {
        draw_header(frame, chunks[1], app.form.stage());
    }
    if let Some(error) = app.form.error_message() {
        draw_error_banner(frame, chunks[3], error);
    }

    match app.form.stage() {
        FormStage::Location => draw_location(frame, chunks[4], app),
        FormStage::AgeRange => draw_age_range(frame, chunks[4], app),
        FormStage::Contact => draw_contact(frame, chunks[4], app),
        FormStage::Success => draw_success(frame, chunks[4], app),
    }

    let footer = Paragraph::new(FOOTER)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

/// Animated progress bar across the top
fn draw_progress(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let value = app.state.progress.value_at(now).clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::Black))
        .ratio(value / 100.0)
        .label("");
    frame.render_widget(gauge, area);
}

/// Back hint on the left, step indicators on the right
fn draw_header(frame: &mut Frame, area: Rect, stage: FormStage) {
    let back = if stage.previous().is_some() {
        "← Atrás"
    } else {
        "← Volver"
    };
    frame.render_widget(
        Paragraph::new(back).style(Style::default().fg(Color::Gray)),
        area,
    );

    let current = stage.index();
    let mut spans = Vec::new();
    for index in 0..FormStage::STEPS.len() {
        let (label, style) = if index < current {
            ("✓".to_string(), Style::default().fg(Color::Green))
        } else if index == current {
            (
                (index + 1).to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ((index + 1).to_string(), Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("({label})"), style));

        if index + 1 < FormStage::STEPS.len() {
            let connector = if index < current {
                Color::Green
            } else {
                Color::DarkGray
            };
            spans.push(Span::styled("──", Style::default().fg(connector)));
        }
    }

    spans.push(Span::styled(
        format!("  {}", stage.name()),
        Style::default().fg(Color::Gray),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}

fn draw_error_banner(frame: &mut Frame, area: Rect, error: &str) {
    let banner = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(banner, area);
}

/// Title and subtitle for a stage; returns the area below them
fn draw_stage_heading(frame: &mut Frame, area: Rect, icon: &str, stage: FormStage) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(icon, Style::default().fg(Color::Cyan))),
        Line::from(Span::styled(
            stage.title(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(stage.subtitle(), Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    chunks[1]
}

fn draw_location(frame: &mut Frame, area: Rect, app: &App) {
    let body = draw_stage_heading(frame, area, "⌖", FormStage::Location);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Min(0),
        ])
        .split(body);

    draw_field(
        frame,
        chunks[0],
        LeadField::ZipCode,
        &app.form.draft().zip_code,
        true,
    );
    render_button(frame, chunks[2], "Continuar", true, true);
}

fn draw_age_range(frame: &mut Frame, area: Rect, app: &App) {
    let body = draw_stage_heading(frame, area, "☺", FormStage::AgeRange);
    let ranges = app.form.options().age_ranges;
    let selected = app.form.draft().age_range.as_str();

    let constraints: Vec<Constraint> = ranges
        .buckets()
        .iter()
        .map(|_| Constraint::Length(BUTTON_HEIGHT))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(body);

    for (index, bucket) in ranges.buckets().iter().enumerate() {
        let is_cursor = index == app.state.age_cursor;
        let is_chosen = bucket.value == selected;

        let marker = if is_chosen { "●" } else { "○" };
        let style = if is_chosen {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if is_cursor {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        let border = if is_cursor || is_chosen {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        let line = Line::from(vec![
            Span::styled(format!(" {}. ", index + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(bucket.label, style),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Line::from(format!(" {marker} ")).right_aligned());
        frame.render_widget(Paragraph::new(line).block(block), chunks[index]);
    }
}

fn draw_contact(frame: &mut Frame, area: Rect, app: &App) {
    let body = draw_stage_heading(frame, area, "✓", FormStage::Contact);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT), // Name
            Constraint::Length(FIELD_HEIGHT), // Phone
            Constraint::Length(1),            // Trust badge
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0), // Testimonial
        ])
        .split(body);

    let draft = app.form.draft();
    let focus = app.state.contact_focus;
    draw_field(
        frame,
        chunks[0],
        LeadField::Name,
        &draft.name,
        focus == ContactFocus::Name,
    );
    draw_field(
        frame,
        chunks[1],
        LeadField::Phone,
        &draft.phone,
        focus == ContactFocus::Phone,
    );

    let badge = Paragraph::new(Line::from(vec![
        Span::styled("🔒 ", Style::default().fg(Color::Green)),
        Span::styled(
            "Tu información está 100% segura",
            Style::default().fg(Color::Gray),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(badge, chunks[2]);

    let (label, enabled) = if app.form.is_submitting() {
        ("Enviando...", false)
    } else {
        ("Solicitar Análisis Gratis", true)
    };
    render_button(frame, chunks[3], label, true, enabled);

    let testimonial = Paragraph::new(vec![
        Line::from(Span::styled(
            TESTIMONIAL,
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            app.form.testimonial_attribution(),
            Style::default().fg(Color::DarkGray),
        ))
        .right_aligned(),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(testimonial, chunks[5]);
}

fn draw_success(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Headline + callback note
            Constraint::Length(6), // What's next
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    let headline = vec![
        Line::from(Span::styled("✓", Style::default().fg(Color::Green))),
        Line::from(Span::styled(
            format!("¡Gracias, {}!", app.form.draft().first_name()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Un especialista bilingüe se comunicará contigo en las próximas ",
                Style::default().fg(Color::Gray),
            ),
            Span::styled("24 horas", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                " al número que proporcionaste.",
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(headline)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let next_steps = Paragraph::new(
        "Prepara cualquier pregunta que tengas sobre cómo hacer crecer tu dinero libre de impuestos. Nuestro especialista te explicará todo en detalle.",
    )
    .style(Style::default().fg(Color::Gray))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" ¿Qué sigue? ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(next_steps, chunks[1]);

    render_button(frame, chunks[3], "← Volver al inicio", true, true);
}
