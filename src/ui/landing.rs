//! Landing view: hero, benefits, social proof, FAQ and call to action

use super::components::{render_button, BUTTON_HEIGHT};
use super::layout::{centered_column, CONTENT_WIDTH};
use crate::app::App;
use chrono::{Datelike, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CTA_LABEL: &str = "Ver Si Califico →";
const CTA_NOTE: &str = "Toma menos de 30 segundos";

const TRUST_POINTS: &[&str] = &["Consulta 100% gratuita", "Especialistas bilingües"];

const BENEFITS: &[(&str, &str)] = &[
    (
        "Crecimiento Libre de Impuestos",
        "Tu dinero crece sin pagar impuestos federales sobre las ganancias.",
    ),
    (
        "Ingreso para tu Retiro",
        "Accede a tu dinero en el retiro, también libre de impuestos.",
    ),
    (
        "Protección para tu Familia",
        "Incluye seguro de vida que protege a quienes más amas.",
    ),
];

const STATS: &[(&str, &str)] = &[
    ("10,000+", "Familias atendidas"),
    ("$0", "Impuestos sobre ganancias"),
    ("24hrs", "Tiempo de respuesta"),
];

const FAQ: &[(&str, &str)] = &[
    (
        "¿Qué es exactamente esta estrategia?",
        "Es un tipo de seguro de vida que combina protección para tu familia con una cuenta de ahorro que crece libre de impuestos federales. Puedes acceder a ese dinero en tu retiro sin pagar impuestos.",
    ),
    (
        "¿Necesito ser ciudadano americano?",
        "No. Si eres residente legal en Estados Unidos (con visa de trabajo, green card, etc.) puedes calificar para esta estrategia.",
    ),
    (
        "¿Cuánto necesito para empezar?",
        "Depende de tu situación personal. Durante la consulta gratuita, un especialista te ayudará a determinar qué monto funciona mejor para ti.",
    ),
    (
        "¿Es realmente gratis la consulta?",
        "Sí, la consulta es 100% gratuita. Un especialista bilingüe te explicará cómo funciona y si es adecuada para tu situación.",
    ),
];

const DISCLAIMER: &str = "Este sitio web es solo para fines informativos y no constituye una oferta de seguro. Los productos de seguro de vida están sujetos a suscripción y aprobación. Los beneficios fiscales dependen de la situación individual de cada persona. Consulte con un profesional financiero o fiscal antes de tomar decisiones.";

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
}

fn muted(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Color::Gray)))
}

fn separator() -> Line<'static> {
    Line::from(Span::styled(
        "─".repeat(40),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Scrollable page content
fn landing_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::styled(
                "Estrategia disponible para residentes en EE.UU.",
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(""),
        heading("Construye tu Retiro con"),
        Line::from(Span::styled(
            "Crecimiento Libre de Impuestos",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        muted("Descubre cómo miles de latinos están protegiendo su futuro financiero con una estrategia que crece sin pagar impuestos federales."),
        Line::from(""),
    ];

    lines.push(Line::from(
        TRUST_POINTS
            .iter()
            .flat_map(|point| {
                [
                    Span::styled("✓ ", Style::default().fg(Color::Green)),
                    Span::raw(format!("{point}   ")),
                ]
            })
            .collect::<Vec<_>>(),
    ));

    lines.extend([
        Line::from(""),
        separator(),
        Line::from(""),
        heading("La Estrategia que los Americanos Ricos Han Usado por Décadas"),
        muted("Ahora disponible para ti y tu familia"),
        Line::from(""),
    ]);

    for (title, description) in BENEFITS {
        lines.push(Line::from(vec![
            Span::styled("◆ ", Style::default().fg(Color::Cyan)),
            Span::styled(*title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(muted(description));
        lines.push(Line::from(""));
    }

    lines.extend([
        separator(),
        Line::from(""),
        heading("Miles de Latinos Ya Están Protegiendo Su Futuro"),
        Line::from(""),
    ]);

    for (value, label) in STATS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{value:>8}  "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(*label, Style::default().fg(Color::Gray)),
        ]));
    }

    lines.extend([
        Line::from(""),
        separator(),
        Line::from(""),
        heading("Preguntas Frecuentes"),
        Line::from(""),
    ]);

    for (question, answer) in FAQ {
        lines.push(Line::from(Span::styled(
            *question,
            Style::default().fg(Color::Cyan),
        )));
        lines.push(muted(answer));
        lines.push(Line::from(""));
    }

    lines.extend([
        separator(),
        Line::from(""),
        heading("¿Listo para Proteger tu Futuro Financiero?"),
        muted("Solicita tu análisis gratuito y descubre cuánto podrías ahorrar en impuestos."),
        Line::from(""),
        separator(),
        Line::from(vec![
            Span::styled("[p] ", Style::default().fg(Color::DarkGray)),
            Span::styled("Política de Privacidad", Style::default().fg(Color::Blue)),
            Span::styled("  •  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[t] ", Style::default().fg(Color::DarkGray)),
            Span::styled("Términos de Uso", Style::default().fg(Color::Blue)),
        ]),
        Line::from(""),
        Line::from(Span::styled(DISCLAIMER, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            format!("© {} Todos los derechos reservados.", Utc::now().year()),
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    lines
}

/// Draw the landing view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let column = centered_column(area, CONTENT_WIDTH);

    // The call to action stays pinned below the scrolling content
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
        ])
        .split(column);

    let content = Paragraph::new(landing_lines())
        .wrap(Wrap { trim: false })
        .scroll((app.state.landing_scroll, 0))
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(content, chunks[0]);

    render_button(frame, chunks[1], CTA_LABEL, true, true);

    let note = Paragraph::new(CTA_NOTE)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(note, chunks[2]);
}
