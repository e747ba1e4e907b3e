//! Per-comment keyword extraction.

use crate::preprocess::{preprocess, GENERIC_EMOJI_TOKEN};
use crate::tagger::{tag_token, PosTag};
use crate::types::KeywordResult;

/// Keywords used when extraction yields nothing or tagging is unavailable.
const DEFAULT_KEYWORDS: &[&str] = &["car", "review"];

enum Mode {
    Tagging,
    Unavailable,
}

/// Pulls salient nouns, proper nouns, and adjectives out of each comment.
///
/// Built either with the rule tagger or in an explicit unavailable state;
/// the unavailable state hands every comment the default keyword set.
pub struct KeywordExtractor {
    mode: Mode,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self { mode: Mode::Tagging }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            mode: Mode::Unavailable,
        }
    }

    /// Extract keywords for every text, one result per input, in order.
    ///
    /// Keyword lists are never empty: texts with no usable tokens fall back
    /// to [`DEFAULT_KEYWORDS`]. Never errors.
    #[must_use]
    pub fn extract(&self, texts: &[String]) -> Vec<KeywordResult> {
        texts
            .iter()
            .map(|text| KeywordResult {
                text: text.clone(),
                keywords: self.keywords_for(text),
            })
            .collect()
    }

    fn keywords_for(&self, text: &str) -> Vec<String> {
        let fallback = || DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect();

        if matches!(self.mode, Mode::Unavailable) {
            return fallback();
        }

        let normalized = preprocess(text);
        let mut keywords: Vec<String> = Vec::new();
        for (i, token) in normalized.split_whitespace().enumerate() {
            let lower = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if lower.is_empty() || lower == GENERIC_EMOJI_TOKEN {
                continue;
            }
            let keep = matches!(
                tag_token(token, i == 0),
                PosTag::Noun | PosTag::ProperNoun | PosTag::Adjective
            );
            if keep && !keywords.contains(&lower) {
                keywords.push(lower);
            }
        }

        if keywords.is_empty() {
            fallback()
        } else {
            keywords
        }
    }
}
