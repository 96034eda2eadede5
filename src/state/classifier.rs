//! Question vs. data-statement classification of free-text turns
//!
//! A turn is a question when it contains a `?` anywhere, or when its
//! lower-cased text starts with one of the interrogative lead words below.
//! The lead-word test is a plain prefix match, so "puedo comer 20g de
//! carbohidratos" is treated as a question and "estoy bien" matches "es".

use serde::{Deserialize, Serialize};

/// Lead words and phrases that mark a question
pub const QUESTION_LEAD_WORDS: &[&str] = &[
    "qué", "cuál", "cuáles", "cuándo", "cuánto", "cómo", "dónde", "por qué", "puedo", "debo", "es",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    Question,
    DataStatement,
}

impl TurnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnKind::Question => "question",
            TurnKind::DataStatement => "data_statement",
        }
    }
}

pub fn classify(input: &str) -> TurnKind {
    if input.contains('?') {
        return TurnKind::Question;
    }

    let lowered = input.trim_start().to_lowercase();
    if QUESTION_LEAD_WORDS.iter().any(|lead| lowered.starts_with(lead)) {
        TurnKind::Question
    } else {
        TurnKind::DataStatement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_question_mark_wins() {
        assert_eq!(classify("es bueno comer pan?"), TurnKind::Question);
        assert_eq!(classify("Hice 20 min de ejercicio?"), TurnKind::Question);
        assert_eq!(classify("¿Qué alimentos puedo comer?"), TurnKind::Question);
    }

    #[test]
    fn test_lead_words() {
        assert_eq!(classify("cuánto ejercicio debo hacer"), TurnKind::Question);
        assert_eq!(classify("Cuánto pan puedo comer"), TurnKind::Question);
        assert_eq!(classify("QUÉ síntomas tiene la diabetes"), TurnKind::Question);
        assert_eq!(classify("por qué sube la glucosa"), TurnKind::Question);
        assert_eq!(classify("debo inyectarme antes de comer"), TurnKind::Question);
    }

    #[test]
    fn test_data_statements() {
        assert_eq!(
            classify("Hice 20 min de ejercicio, comí pan y mi glucosa es 95"),
            TurnKind::DataStatement
        );
        assert_eq!(classify("mi glucosa es 120"), TurnKind::DataStatement);
        assert_eq!(classify("comí arroz con pollo"), TurnKind::DataStatement);
    }

    #[test]
    fn test_known_lead_word_caveat() {
        // prefix matching is intentionally kept as-is
        assert_eq!(classify("puedo comer 20g de carbohidratos"), TurnKind::Question);
        assert_eq!(classify("estoy bien, glucosa 100"), TurnKind::Question);
    }

    proptest! {
        #[test]
        fn prop_any_text_with_question_mark_is_a_question(prefix in "\\PC*", suffix in "\\PC*") {
            let input = format!("{}?{}", prefix, suffix);
            prop_assert_eq!(classify(&input), TurnKind::Question);
        }

        #[test]
        fn prop_cuanto_prefix_is_a_question(rest in "[a-z0-9 ,.]*") {
            let input = format!("cuánto{}", rest);
            prop_assert_eq!(classify(&input), TurnKind::Question);
        }
    }
}
