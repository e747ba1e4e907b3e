//! Question detection over comment batches.

use regex::Regex;

use crate::tagger;
use crate::types::QuestionResult;

/// Leading interrogative words. Applied to the lower-cased, trimmed text.
const LEADING_PATTERN: &str =
    r"^(why|what|when|where|who|how|is|are|does|do|did|can|could|should|would)\b";

enum Mode {
    /// Full cascade: punctuation, auxiliary-first syntax, leading word.
    Syntactic,
    /// Punctuation and leading word only (no tagging engine).
    HeuristicOnly,
}

pub struct QuestionDetector {
    mode: Mode,
    leading: Regex,
}

impl Default for QuestionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionDetector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: Mode::Syntactic,
            leading: Regex::new(LEADING_PATTERN).expect("valid question regex"),
        }
    }

    #[must_use]
    pub fn heuristic_only() -> Self {
        Self {
            mode: Mode::HeuristicOnly,
            leading: Regex::new(LEADING_PATTERN).expect("valid question regex"),
        }
    }

    /// Detect questions for every text, one result per input, in order.
    #[must_use]
    pub fn detect(&self, texts: &[String]) -> Vec<QuestionResult> {
        texts
            .iter()
            .map(|text| QuestionResult {
                text: text.clone(),
                is_question: self.is_question(text),
            })
            .collect()
    }

    /// Decision cascade, first match wins:
    /// 1. a literal `?` anywhere;
    /// 2. an auxiliary verb as the first token (syntactic mode only);
    /// 3. the text starts with an interrogative word.
    #[must_use]
    pub fn is_question(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        if trimmed.contains('?') {
            return true;
        }

        if matches!(self.mode, Mode::Syntactic) {
            let first = trimmed
                .split_whitespace()
                .next()
                .map(|t| {
                    t.trim_matches(|c: char| !c.is_alphanumeric())
                        .to_lowercase()
                })
                .unwrap_or_default();
            if tagger::is_auxiliary(&first) {
                return true;
            }
        }

        self.leading.is_match(&trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn question_mark_wins() {
        let d = QuestionDetector::new();
        assert!(d.is_question("Why is the V8 so loud?"));
        assert!(d.is_question("the price though?"));
    }

    #[test]
    fn auxiliary_first_token_is_question() {
        let d = QuestionDetector::new();
        assert!(d.is_question("Will this hold up in winter"));
        assert!(d.is_question("Has anyone driven one"));
    }

    #[test]
    fn leading_question_word_is_question() {
        let d = QuestionDetector::new();
        assert!(d.is_question("how much does it cost"));
        assert!(d.is_question("What a weird color choice"));
    }

    #[test]
    fn statements_are_not_questions() {
        let d = QuestionDetector::new();
        assert!(!d.is_question("This car is amazing!!!"));
        assert!(!d.is_question("Average fuel economy."));
        assert!(!d.is_question(""));
    }

    #[test]
    fn heuristic_mode_skips_auxiliary_check() {
        let d = QuestionDetector::heuristic_only();
        // "Will" is not in the leading-word pattern, so without the
        // syntactic check this reads as a statement.
        assert!(!d.is_question("Will this hold up in winter"));
        // Punctuation and leading words still work.
        assert!(d.is_question("holding up well?"));
        assert!(d.is_question("why so loud"));
    }

    #[test]
    fn detect_aligns_with_input() {
        let d = QuestionDetector::new();
        let input = texts(&[
            "Why is the V8 so loud?",
            "This car is amazing!!!",
            "Average fuel economy.",
        ]);
        let results = d.detect(&input);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_question);
        assert!(!results[1].is_question);
        assert!(!results[2].is_question);
    }
}
