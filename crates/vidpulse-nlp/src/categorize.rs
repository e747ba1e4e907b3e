//! Exclusive comment bucketing: questions, hot takes, most interesting.

use crate::preprocess::preprocess;
use crate::questions::QuestionDetector;
use crate::sentiment::SentimentClassifier;
use crate::types::CategorizedComments;

/// Maximum entries per bucket, insertion order preserved.
const BUCKET_CAP: usize = 10;

/// Preprocessed comments shorter than this are skipped entirely.
const MIN_COMMENT_CHARS: usize = 3;

/// Single-comment confidence above this marks a hot take.
const HOT_TAKE_THRESHOLD: f32 = 0.9;

/// Lower bound of the "clearly opinionated but not polarizing" band.
const INTERESTING_FLOOR: f32 = 0.6;

/// Vocabulary that marks a comment as strongly opinionated regardless of
/// its confidence score.
const STRONG_OPINION_WORDS: &[&str] = &[
    "amazing",
    "terrible",
    "worst",
    "best",
    "awful",
    "incredible",
    "horrible",
    "love",
    "hate",
    "garbage",
    "perfect",
    "trash",
    "insane",
    "unbelievable",
    "fire",
];

const NEGATION_WORDS: &[&str] = &["not", "never", "no", "nothing", "nobody", "cannot"];

/// Buckets comments into `questions` / `hot_takes` / `most_interesting`.
///
/// Uses the same question cascade as the question-detection pass, so a
/// comment claimed by `questions` can never also surface as a hot take —
/// exclusivity holds by construction, not by post-filtering.
pub struct Categorizer {
    detector: QuestionDetector,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Categorizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            detector: QuestionDetector::new(),
        }
    }

    /// Categorize a batch. Per comment, in order: preprocess and skip if
    /// too short; question claim (exclusive, stops here); hot-take rule
    /// (score above threshold, negation, or strong vocabulary); moderate
    /// score band into `most_interesting`; otherwise uncategorized.
    pub async fn categorize(
        &self,
        texts: &[String],
        classifier: &SentimentClassifier,
    ) -> CategorizedComments {
        let mut buckets = CategorizedComments::default();

        for text in texts {
            let normalized = preprocess(text);
            if normalized.chars().count() < MIN_COMMENT_CHARS {
                continue;
            }

            if self.detector.is_question(&normalized) {
                push_capped(&mut buckets.questions, text);
                continue;
            }

            let score = classifier.score_one(&normalized).await;
            if score > HOT_TAKE_THRESHOLD
                || has_negation(&normalized)
                || has_strong_opinion(&normalized)
            {
                push_capped(&mut buckets.hot_takes, text);
                continue;
            }

            if (INTERESTING_FLOOR..=HOT_TAKE_THRESHOLD).contains(&score) {
                push_capped(&mut buckets.most_interesting, text);
            }
        }

        tracing::debug!(
            questions = buckets.questions.len(),
            hot_takes = buckets.hot_takes.len(),
            most_interesting = buckets.most_interesting.len(),
            total = texts.len(),
            "categorized comment batch"
        );
        buckets
    }
}

fn push_capped(bucket: &mut Vec<String>, text: &str) {
    if bucket.len() < BUCKET_CAP {
        bucket.push(text.to_string());
    }
}

fn lowered_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(|t| {
        t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
            .to_lowercase()
    })
}

fn has_negation(text: &str) -> bool {
    lowered_tokens(text).any(|t| NEGATION_WORDS.contains(&t.as_str()) || t.ends_with("n't"))
}

fn has_strong_opinion(text: &str) -> bool {
    lowered_tokens(text).any(|t| STRONG_OPINION_WORDS.contains(&t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn lexicon_classifier() -> SentimentClassifier {
        SentimentClassifier::lexicon_only(512)
    }

    #[tokio::test]
    async fn question_claim_is_exclusive() {
        let categorizer = Categorizer::new();
        // "amazing" would qualify as a hot take, but the question claim
        // comes first and is exclusive.
        let buckets = categorizer
            .categorize(&texts(&["Is this amazing or what?"]), &lexicon_classifier())
            .await;
        assert_eq!(buckets.questions.len(), 1);
        assert!(buckets.hot_takes.is_empty());
        assert!(buckets.most_interesting.is_empty());
    }

    #[tokio::test]
    async fn strong_vocabulary_marks_hot_take() {
        let categorizer = Categorizer::new();
        let buckets = categorizer
            .categorize(&texts(&["This car is amazing!!!"]), &lexicon_classifier())
            .await;
        assert_eq!(buckets.hot_takes, vec!["This car is amazing!!!"]);
    }

    #[tokio::test]
    async fn negation_marks_hot_take() {
        let categorizer = Categorizer::new();
        let buckets = categorizer
            .categorize(
                &texts(&["I would never buy this", "don't bother with the diesel"]),
                &lexicon_classifier(),
            )
            .await;
        assert_eq!(buckets.hot_takes.len(), 2);
    }

    #[tokio::test]
    async fn moderate_score_lands_in_most_interesting() {
        let categorizer = Categorizer::new();
        // One lexicon hit ("solid", 0.3) puts the confidence at 0.65,
        // inside the 0.6..=0.9 band.
        let buckets = categorizer
            .categorize(&texts(&["pretty solid daily driver"]), &lexicon_classifier())
            .await;
        assert_eq!(buckets.most_interesting.len(), 1, "got {buckets:?}");
    }

    #[tokio::test]
    async fn bland_comment_is_uncategorized() {
        let categorizer = Categorizer::new();
        let buckets = categorizer
            .categorize(&texts(&["Average fuel economy."]), &lexicon_classifier())
            .await;
        assert!(buckets.questions.is_empty());
        assert!(buckets.hot_takes.is_empty());
        assert!(buckets.most_interesting.is_empty());
    }

    #[tokio::test]
    async fn too_short_comments_are_skipped() {
        let categorizer = Categorizer::new();
        let buckets = categorizer
            .categorize(&texts(&["", "  ", "ok", "!?"]), &lexicon_classifier())
            .await;
        assert_eq!(buckets, CategorizedComments::default());
    }

    #[tokio::test]
    async fn each_comment_lands_in_at_most_one_bucket() {
        let categorizer = Categorizer::new();
        let input = texts(&[
            "Why is the V8 so loud?",
            "This car is amazing!!!",
            "pretty solid daily driver",
            "never buying one",
            "Average fuel economy.",
        ]);
        let buckets = categorizer.categorize(&input, &lexicon_classifier()).await;

        for text in &input {
            let hits = usize::from(buckets.questions.contains(text))
                + usize::from(buckets.hot_takes.contains(text))
                + usize::from(buckets.most_interesting.contains(text));
            assert!(hits <= 1, "{text:?} appears in {hits} buckets");
        }
    }

    #[tokio::test]
    async fn buckets_are_capped() {
        let categorizer = Categorizer::new();
        let input: Vec<String> = (0..15).map(|i| format!("what about trim level {i}?")).collect();
        let buckets = categorizer.categorize(&input, &lexicon_classifier()).await;
        assert_eq!(buckets.questions.len(), 10);
        // Insertion order preserved up to the cap.
        assert_eq!(buckets.questions[0], input[0]);
        assert_eq!(buckets.questions[9], input[9]);
    }
}
