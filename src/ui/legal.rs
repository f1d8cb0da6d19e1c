//! Privacy policy and terms of use

use super::layout::{centered_column, CONTENT_WIDTH};
use crate::app::App;
use crate::state::View;
use chrono::{Datelike, NaiveDate, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

struct LegalSection {
    heading: &'static str,
    body: &'static str,
    bullets: &'static [&'static str],
}

const PRIVACY: &[LegalSection] = &[
    LegalSection {
        heading: "1. Información que Recopilamos",
        body: "Cuando completas nuestro formulario de contacto, recopilamos la siguiente información:",
        bullets: &[
            "Nombre",
            "Número de teléfono",
            "Código postal (ZIP code)",
            "Rango de edad",
        ],
    },
    LegalSection {
        heading: "2. Cómo Usamos tu Información",
        body: "Utilizamos la información recopilada para:",
        bullets: &[
            "Contactarte para brindarte información sobre productos de seguro de vida",
            "Conectarte con un especialista financiero en tu área",
            "Personalizar la información que te proporcionamos",
            "Mejorar nuestros servicios",
        ],
    },
    LegalSection {
        heading: "3. Compartir Información",
        body: "Tu información puede ser compartida con agentes de seguros licenciados y socios comerciales con el propósito de brindarte los servicios solicitados. No vendemos tu información personal a terceros.",
        bullets: &[],
    },
    LegalSection {
        heading: "4. Cookies y Tecnologías de Seguimiento",
        body: "Utilizamos cookies y tecnologías similares, incluyendo el píxel de Facebook, para analizar el tráfico del sitio web y mejorar tu experiencia. Estas tecnologías nos ayudan a entender cómo interactúas con nuestro sitio.",
        bullets: &[],
    },
    LegalSection {
        heading: "5. Seguridad de los Datos",
        body: "Implementamos medidas de seguridad técnicas y organizativas para proteger tu información personal contra acceso no autorizado, pérdida o alteración.",
        bullets: &[],
    },
    LegalSection {
        heading: "6. Tus Derechos",
        body: "Tienes derecho a acceder, corregir o eliminar tu información personal. Para ejercer estos derechos, contáctanos utilizando la información proporcionada a continuación.",
        bullets: &[],
    },
    LegalSection {
        heading: "7. Contacto",
        body: "Si tienes preguntas sobre esta política de privacidad, puedes contactarnos a través del formulario en nuestro sitio web.",
        bullets: &[],
    },
];

const TERMS: &[LegalSection] = &[
    LegalSection {
        heading: "1. Aceptación de los Términos",
        body: "Al acceder y utilizar este sitio web, aceptas estar sujeto a estos términos de uso. Si no estás de acuerdo con alguna parte de estos términos, no debes utilizar nuestro sitio.",
        bullets: &[],
    },
    LegalSection {
        heading: "2. Propósito del Sitio",
        body: "Este sitio web tiene como propósito proporcionar información general sobre estrategias de ahorro e inversión, específicamente sobre seguros de vida con componente de inversión. La información proporcionada es solo para fines educativos y no constituye asesoramiento financiero, fiscal o legal.",
        bullets: &[],
    },
    LegalSection {
        heading: "3. No es una Oferta de Seguro",
        body: "El contenido de este sitio web no constituye una oferta de venta de ningún producto de seguro. Todos los productos de seguro están sujetos a los términos y condiciones de la póliza específica, suscripción y aprobación por parte de la compañía de seguros.",
        bullets: &[],
    },
    LegalSection {
        heading: "4. Consentimiento de Contacto",
        body: "Al enviar tu información a través de nuestro formulario, consientes expresamente a ser contactado por teléfono, mensaje de texto o correo electrónico por nosotros y/o nuestros socios comerciales para discutir productos de seguros y servicios financieros relacionados.",
        bullets: &[],
    },
    LegalSection {
        heading: "5. Precisión de la Información",
        body: "Hacemos esfuerzos razonables para asegurar que la información en este sitio sea precisa y actualizada. Sin embargo, no garantizamos la exactitud, integridad o actualidad de la información proporcionada.",
        bullets: &[],
    },
    LegalSection {
        heading: "6. Limitación de Responsabilidad",
        body: "En ningún caso seremos responsables por daños directos, indirectos, incidentales, especiales o consecuentes que resulten del uso o la imposibilidad de usar este sitio web o la información contenida en él.",
        bullets: &[],
    },
    LegalSection {
        heading: "7. Consideraciones Fiscales",
        body: "Las referencias a beneficios fiscales en este sitio son de naturaleza general. Los beneficios fiscales reales dependen de la situación individual de cada persona y están sujetos a cambios en las leyes fiscales. Debes consultar con un asesor fiscal calificado antes de tomar decisiones basadas en consideraciones fiscales.",
        bullets: &[],
    },
    LegalSection {
        heading: "8. Modificaciones",
        body: "Nos reservamos el derecho de modificar estos términos en cualquier momento. Los cambios entrarán en vigor inmediatamente después de su publicación en el sitio web.",
        bullets: &[],
    },
    LegalSection {
        heading: "9. Ley Aplicable",
        body: "Estos términos se regirán e interpretarán de acuerdo con las leyes de los Estados Unidos de América, sin tener en cuenta sus disposiciones sobre conflictos de leyes.",
        bullets: &[],
    },
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long Spanish date, e.g. `19 de octubre de 2026`
fn spanish_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

fn document_lines(sections: &'static [LegalSection], updated: NaiveDate) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Última actualización: {}", spanish_date(updated)),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for section in sections {
        lines.push(Line::from(Span::styled(
            section.heading,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(section.body));
        for bullet in section.bullets {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(Color::Cyan)),
                Span::raw(*bullet),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Draw the privacy policy or the terms of use
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let (title, sections) = match app.state.current_view {
        View::Terms => ("Términos de Uso", TERMS),
        _ => ("Política de Privacidad", PRIVACY),
    };

    let block = Block::default()
        .title(format!(" {title} "))
        .title_bottom(Line::from(" ← Volver al inicio (Esc) ").left_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(document_lines(sections, Utc::now().date_naive()))
        .wrap(Wrap { trim: false })
        .scroll((app.state.legal_scroll, 0))
        .block(block);

    frame.render_widget(paragraph, centered_column(area, CONTENT_WIDTH));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(spanish_date(date), "19 de octubre de 2026");
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(spanish_date(date), "5 de enero de 2025");
    }

    #[test]
    fn test_privacy_lists_collected_fields() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let text: Vec<String> = document_lines(PRIVACY, date)
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert!(text.iter().any(|l| l.contains("• Rango de edad")));
        assert!(text[0].contains("1 de enero de 2026"));
    }

    #[test]
    fn test_terms_section_count() {
        assert_eq!(TERMS.len(), 9);
        assert_eq!(PRIVACY.len(), 7);
    }
}
