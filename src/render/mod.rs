//! Message rendering
//!
//! Turns log messages into what a front-end displays: Telegram HTML for the
//! bot, plain text for the console.

use std::sync::OnceLock;
use regex::Regex;
use teloxide::utils::html::escape;
use crate::models::{Message, Richness, Sender};
use crate::utils::helpers::format_clock;

fn emphasis_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("emphasis pattern is valid"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("tag pattern is valid"))
}

/// Render a message body for Telegram's HTML parse mode
pub fn to_telegram_html(message: &Message) -> String {
    match message.richness {
        Richness::Plain => escape(&message.text),
        Richness::Emphasis => emphasis_pattern()
            .replace_all(&escape(&message.text), "<b>$1</b>")
            .into_owned(),
        Richness::Structured => message.text.clone(),
    }
}

/// Render a message body as terminal text
pub fn to_plain_text(message: &Message) -> String {
    match message.richness {
        Richness::Plain => message.text.clone(),
        Richness::Emphasis => emphasis_pattern().replace_all(&message.text, "$1").into_owned(),
        Richness::Structured => {
            let stripped = tag_pattern().replace_all(&message.text, "");
            stripped
                .replace("&lt;", "<")
                .replace("&gt;", ">")
                .replace("&quot;", "\"")
                .replace("&amp;", "&")
        }
    }
}

/// Render a full console transcript line, prefixed with time and author
pub fn to_console_line(message: &Message) -> String {
    let author = match message.sender {
        Sender::User => "Tú",
        Sender::Bot => "Asistente",
    };
    format!("[{}] {}:\n{}", format_clock(message.sent_at), author, to_plain_text(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_escaped_for_telegram() {
        let message = Message::bot(1, "glucosa <100 & estable", Richness::Plain);
        assert_eq!(to_telegram_html(&message), "glucosa &lt;100 &amp; estable");
        assert_eq!(to_plain_text(&message), "glucosa <100 & estable");
    }

    #[test]
    fn test_emphasis_markup() {
        let message = Message::bot(1, "Escribe **otro**, **mas** o **salir**.", Richness::Emphasis);
        assert_eq!(
            to_telegram_html(&message),
            "Escribe <b>otro</b>, <b>mas</b> o <b>salir</b>."
        );
        assert_eq!(to_plain_text(&message), "Escribe otro, mas o salir.");
    }

    #[test]
    fn test_structured_passes_through_for_telegram() {
        let html = "<b>PREDICCIÓN</b>\n• glucosa &lt;200";
        let message = Message::bot(1, html, Richness::Structured);
        assert_eq!(to_telegram_html(&message), html);
        assert_eq!(to_plain_text(&message), "PREDICCIÓN\n• glucosa <200");
    }

    #[test]
    fn test_user_text_never_interpreted() {
        let message = Message::user(2, "**hola** <b>");
        assert_eq!(to_telegram_html(&message), "**hola** &lt;b&gt;");
        assert!(to_console_line(&message).ends_with("Tú:\n**hola** <b>"));
    }
}
