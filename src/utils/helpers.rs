//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new session identifier
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Format a timestamp for the console transcript
pub fn format_clock(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Split multi-line backend text into trimmed, non-blank lines
pub fn non_blank_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Render a 0..1 confidence score as a whole percentage
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.0}%", (ratio * 100.0).clamp(0.0, 100.0))
}

/// Format an insulin dose without a trailing `.0` for whole numbers
pub fn format_dose(units: f64) -> String {
    if units.fract() == 0.0 {
        format!("{:.0}", units)
    } else {
        format!("{}", (units * 100.0).round() / 100.0)
    }
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 8), "hello...");
        // multi-byte characters are never split
        assert_eq!(truncate_text("cuánto cuánto", 7), "cuán...");
    }

    #[test]
    fn test_non_blank_lines() {
        let lines = non_blank_lines("Glucosa en rango: 95 mg/dl\n\n  Poco ejercicio: 20 min  \n");
        assert_eq!(lines, vec!["Glucosa en rango: 95 mg/dl", "Poco ejercicio: 20 min"]);
        assert!(non_blank_lines("\n \n").is_empty());
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.873), "87%");
        assert_eq!(format_percentage(1.0), "100%");
        assert_eq!(format_percentage(1.7), "100%");
    }

    #[test]
    fn test_format_dose() {
        assert_eq!(format_dose(6.0), "6");
        assert_eq!(format_dose(6.5), "6.5");
        assert_eq!(format_dose(6.456), "6.46");
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Maria   José "), "Maria José");
    }
}
