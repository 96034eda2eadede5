//! Bot reply texts
//!
//! Plain and emphasis replies are short Spanish templates. Structured replies
//! (dose report, question answer) are produced as Telegram-flavoured HTML
//! with every backend-provided value escaped.

use teloxide::utils::html::escape;
use crate::models::Richness;
use crate::services::{CombinedParse, QuestionAnswer};
use crate::utils::helpers::{format_dose, format_percentage, non_blank_lines};

const DATA_EXAMPLE: &str = "Ejemplo: 'Hice 20 min de ejercicio, comí pan y mi glucosa es 95'";
const CONTINUE_HINT: &str = "¿Deseas otro cálculo? Escribe **otro**, **mas** o **salir**.";

/// A bot message before it gets an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub text: String,
    pub richness: Richness,
}

impl BotReply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), richness: Richness::Plain }
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Self { text: text.into(), richness: Richness::Emphasis }
    }

    pub fn structured(text: impl Into<String>) -> Self {
        Self { text: text.into(), richness: Richness::Structured }
    }
}

pub fn greeting() -> BotReply {
    BotReply::plain("¡Hola! Bienvenido al asistente de diabetes.\n\nAntes de comenzar, ¿cuál es tu nombre?")
}

pub fn welcome_back(name: &str) -> BotReply {
    BotReply::emphasis(format!(
        "¡Bienvenido de vuelta, **{}**! Cuéntame sobre tu día de hoy.\n\n{}",
        name, DATA_EXAMPLE
    ))
}

pub fn ask_age(name: &str) -> BotReply {
    BotReply::plain(format!("Mucho gusto, {}! Ahora, ¿cuántos años tienes?", name))
}

pub fn invalid_age() -> BotReply {
    BotReply::plain("Por favor, ingresa una edad válida (entre 1 y 150 años).")
}

pub fn age_confirmed(age: u32) -> BotReply {
    BotReply::emphasis(format!(
        "¡Perfecto! Tienes **{} años**. Ahora cuéntame sobre tu día.\n\n{}\n\n\
         También puedo responder preguntas: '¿Qué alimentos puedo comer?' o '¿Cuáles son los síntomas?'",
        age, DATA_EXAMPLE
    ))
}

pub fn new_day(name: &str) -> BotReply {
    BotReply::plain(format!("Perfecto {}, ¡cuéntame sobre tu nuevo día!", name))
}

pub fn farewell() -> BotReply {
    BotReply::plain("¡Gracias por usar el chatbot! Recuerda siempre consultar con tu médico.")
}

pub fn continue_clarification() -> BotReply {
    BotReply::emphasis(CONTINUE_HINT)
}

pub fn question_unanswered() -> BotReply {
    BotReply::emphasis(format!(
        "No pude encontrar respuesta a tu pregunta. Intenta ser más específico.\n\n{}",
        CONTINUE_HINT
    ))
}

pub fn question_transport_error() -> BotReply {
    BotReply::emphasis(format!("Error al procesar tu pregunta. Intenta de nuevo.\n\n{}", CONTINUE_HINT))
}

/// Parse failure carrying the server explanation verbatim
pub fn parse_failed(server_message: Option<&str>) -> BotReply {
    let reason = server_message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or("respuesta incompleta del servidor");
    BotReply::emphasis(format!(
        "No pude procesar tu información: {}. Intenta de nuevo con datos más claros.\n\n{}",
        reason, CONTINUE_HINT
    ))
}

pub fn parse_transport_error() -> BotReply {
    BotReply::emphasis(format!("Error de conexión. Intenta de nuevo.\n\n{}", CONTINUE_HINT))
}

fn bullets(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| format!("• {}", escape(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Dose report for a successful `/parse-combined`
pub fn dose_report(parse: &CombinedParse, dose: f64) -> BotReply {
    let mut sections = Vec::new();

    if !parse.interpretations.is_empty() {
        let lines: Vec<&str> = parse.interpretations.iter().map(String::as_str).collect();
        sections.push(format!("<b>He interpretado tu información:</b>\n{}", bullets(&lines)));
    }

    let mut prediction = format!(
        "<b>PREDICCIÓN DE DOSIS DE INSULINA</b>\n<b>{} unidades</b>",
        format_dose(dose)
    );
    if let Some(range) = parse.range.as_deref().filter(|r| !r.trim().is_empty()) {
        prediction.push_str(&format!("\nRango estimado: {} unidades", escape(range.trim())));
    }
    sections.push(prediction);

    let analysis = non_blank_lines(parse.analysis.as_deref().unwrap_or(""));
    if !analysis.is_empty() {
        sections.push(format!("<b>Análisis de tu situación:</b>\n{}", bullets(&analysis)));
    }

    let context = non_blank_lines(parse.medical_context.as_deref().unwrap_or(""));
    if !context.is_empty() {
        sections.push(format!("<b>Recomendaciones médicas:</b>\n{}", bullets(&context)));
    }

    sections.push(
        "<b>IMPORTANTE:</b> Esta predicción se basa en los datos que proporcionaste. \
         Siempre consulta con tu médico antes de tomar decisiones sobre tu medicación."
            .to_string(),
    );
    sections.push("¿Deseas otro cálculo? Escribe <b>otro</b>, <b>mas</b> o <b>salir</b>.".to_string());

    BotReply::structured(sections.join("\n\n"))
}

/// Educational answer for a successful `/ask`
pub fn answer_report(answer: &QuestionAnswer, text: &str) -> BotReply {
    let mut sections = vec![format!("📚 <b>Información sobre diabetes:</b>\n{}", escape(text.trim()))];

    let mut meta = Vec::new();
    if let Some(kind) = answer.question_type.as_deref().filter(|k| !k.is_empty()) {
        meta.push(format!("<b>Tipo:</b> {}", escape(kind)));
    }
    if let Some(confidence) = answer.confidence {
        meta.push(format!("<b>Confianza:</b> {}", format_percentage(confidence)));
    }
    meta.push("<b>Fuente:</b> Base de datos médica".to_string());
    sections.push(format!("📊 {}", meta.join(" | ")));

    sections.push(
        "⚠️ <b>IMPORTANTE:</b> Esta información es de carácter educativo. \
         Siempre consulta con tu médico para diagnóstico y tratamiento."
            .to_string(),
    );
    sections.push("¿Deseas otro cálculo? Escribe <b>otro</b>, <b>mas</b> o <b>salir</b>.".to_string());

    BotReply::structured(sections.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with(analysis: &str, medical_context: Option<&str>) -> CombinedParse {
        CombinedParse {
            success: true,
            interpretations: vec!["Ejercicio: 20 minutos".to_string(), "Glucosa: 95 mg/dl".to_string()],
            predicted_dose: Some(6.5),
            range: Some("5.5 - 7.5".to_string()),
            analysis: Some(analysis.to_string()),
            medical_context: medical_context.map(str::to_string),
            message: None,
        }
    }

    #[test]
    fn test_dose_report_sections() {
        let parse = parse_with("Poco ejercicio: 20 min\n\nGlucosa en rango: 95 mg/dl", None);
        let reply = dose_report(&parse, 6.5);

        assert_eq!(reply.richness, Richness::Structured);
        assert!(reply.text.contains("• Ejercicio: 20 minutos"));
        assert!(reply.text.contains("<b>6.5 unidades</b>"));
        assert!(reply.text.contains("Rango estimado: 5.5 - 7.5 unidades"));
        assert!(reply.text.contains("• Poco ejercicio: 20 min\n• Glucosa en rango: 95 mg/dl"));
        assert!(!reply.text.contains("Recomendaciones médicas"));
    }

    #[test]
    fn test_dose_report_blank_medical_context_is_omitted() {
        let reply = dose_report(&parse_with("x", Some("  \n ")), 4.0);
        assert!(!reply.text.contains("Recomendaciones médicas"));

        let reply = dose_report(&parse_with("x", Some("Hidratarse\nControlar glucosa")), 4.0);
        assert!(reply.text.contains("<b>Recomendaciones médicas:</b>\n• Hidratarse\n• Controlar glucosa"));
    }

    #[test]
    fn test_backend_text_is_escaped() {
        let mut parse = parse_with("glucosa <200 & subiendo", None);
        parse.interpretations = vec!["<script>".to_string()];
        let reply = dose_report(&parse, 3.0);
        assert!(reply.text.contains("&lt;script&gt;"));
        assert!(reply.text.contains("glucosa &lt;200 &amp; subiendo"));
    }

    #[test]
    fn test_answer_report() {
        let answer = QuestionAnswer {
            success: true,
            answer: Some("Verduras y legumbres".to_string()),
            question_type: Some("alimentación".to_string()),
            confidence: Some(0.82),
            message: None,
        };
        let reply = answer_report(&answer, "Verduras y legumbres");
        assert_eq!(reply.richness, Richness::Structured);
        assert!(reply.text.contains("Verduras y legumbres"));
        assert!(reply.text.contains("<b>Tipo:</b> alimentación"));
        assert!(reply.text.contains("<b>Confianza:</b> 82%"));
    }

    #[test]
    fn test_parse_failed_includes_server_message_verbatim() {
        let reply = parse_failed(Some("Error al procesar información"));
        assert!(reply.text.starts_with("No pude procesar tu información: Error al procesar información."));

        let reply = parse_failed(None);
        assert!(reply.text.contains("respuesta incompleta del servidor"));
    }
}
