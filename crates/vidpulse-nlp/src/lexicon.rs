//! Opinion lexicon used by the heuristic sentiment backend.

/// Word weights for viewer-comment sentiment.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The summed score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.6),
    ("awesome", 0.5),
    ("incredible", 0.6),
    ("love", 0.5),
    ("loved", 0.5),
    ("best", 0.5),
    ("beautiful", 0.4),
    ("perfect", 0.6),
    ("recommend", 0.4),
    ("solid", 0.3),
    ("smooth", 0.3),
    ("reliable", 0.3),
    ("fun", 0.3),
    ("fire", 0.5),
    ("like", 0.2),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("worst", -0.6),
    ("awful", -0.6),
    ("horrible", -0.6),
    ("hate", -0.6),
    ("hated", -0.6),
    ("ugly", -0.4),
    ("boring", -0.3),
    ("disappointing", -0.4),
    ("disappointed", -0.4),
    ("overpriced", -0.4),
    ("garbage", -0.6),
    ("trash", -0.6),
    ("broken", -0.4),
    ("unreliable", -0.4),
    ("slow", -0.2),
    ("dislike", -0.3),
];

/// Score a text string using the opinion lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
pub(crate) fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Map a lexicon score into a confidence in `[0.5, 1.0]`.
///
/// Neutral text (no lexicon hits) sits at 0.5; a saturated score reaches
/// 1.0. This keeps heuristic-mode confidences on the same scale the remote
/// model uses, so the categorizer's score bands apply unchanged.
pub(crate) fn opinion_confidence(text: &str) -> f32 {
    0.5 + lexicon_score(text).abs() / 2.0
}
