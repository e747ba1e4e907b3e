//! Orchestration of the analysis passes over one comment batch.

use vidpulse_core::{AppConfig, RetryPolicy};

use crate::categorize::Categorizer;
use crate::error::NlpError;
use crate::generation::{GenerationBackend, GenerationClient};
use crate::keywords::KeywordExtractor;
use crate::questions::QuestionDetector;
use crate::report::ReportSynthesizer;
use crate::sentiment::SentimentClassifier;
use crate::types::{
    Analysis, CategorizedComments, KeywordResult, QuestionResult, Report, SentimentResult,
    SentimentSummary,
};

/// Owns every pass and runs them in order over one request's batch.
///
/// All handles are read-only after construction; one pipeline instance is
/// shared across concurrent requests.
pub struct AnalysisPipeline {
    classifier: SentimentClassifier,
    keywords: KeywordExtractor,
    questions: QuestionDetector,
    categorizer: Categorizer,
    synthesizer: ReportSynthesizer,
}

impl AnalysisPipeline {
    #[must_use]
    pub fn new(
        classifier: SentimentClassifier,
        keywords: KeywordExtractor,
        questions: QuestionDetector,
        categorizer: Categorizer,
        synthesizer: ReportSynthesizer,
    ) -> Self {
        Self {
            classifier,
            keywords,
            questions,
            categorizer,
            synthesizer,
        }
    }

    /// Build the pipeline from configuration, choosing each capability's
    /// state once: remote sentiment when a service URL is configured,
    /// lexicon mode otherwise; remote generation when an API key is
    /// configured, degraded placeholder reports otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::Http`] if the generation HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, NlpError> {
        let classifier = match &config.sentiment_url {
            Some(url) => SentimentClassifier::remote(url, config.max_comment_length),
            None => {
                tracing::warn!(
                    "VIDPULSE_SENTIMENT_URL not set — sentiment runs in lexicon-only mode"
                );
                SentimentClassifier::lexicon_only(config.max_comment_length)
            }
        };

        let generation = match &config.cohere_api_key {
            Some(key) => GenerationBackend::Remote(GenerationClient::new(
                &config.cohere_base_url,
                key,
                &config.generation_model,
            )?),
            None => {
                tracing::warn!("COHERE_API_KEY not set — reports degrade to placeholders");
                GenerationBackend::Unavailable
            }
        };

        let policy = RetryPolicy::new(config.max_retries, config.retry_backoff_base_ms, 2);

        Ok(Self::new(
            classifier,
            KeywordExtractor::new(),
            QuestionDetector::new(),
            Categorizer::new(),
            ReportSynthesizer::new(generation, policy),
        ))
    }

    /// Run the full pipeline over one batch.
    ///
    /// The three per-comment passes run concurrently over the same ordered
    /// input and are joined before categorization. Each pass must return
    /// exactly one result per input comment; a length mismatch is a fatal
    /// internal defect, surfaced as [`NlpError::AlignmentMismatch`] rather
    /// than silently zipping misaligned arrays.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::AlignmentMismatch`] if any pass breaks the
    /// alignment invariant. Per-item classifier failures never surface
    /// here — each component absorbs them into its documented fallback.
    pub async fn run(
        &self,
        texts: &[String],
        transcript: &str,
        likes: u64,
        dislikes: u64,
    ) -> Result<Analysis, NlpError> {
        if texts.is_empty() {
            return Ok(Self::empty_analysis());
        }

        let (sentiment, keywords, questions) = self.annotate(texts).await?;

        let categorized = self.categorizer.categorize(texts, &self.classifier).await;
        let report = self
            .synthesizer
            .generate(transcript, likes, dislikes, &sentiment, &categorized)
            .await;

        Ok(Analysis {
            sentiment,
            keywords,
            questions,
            report,
        })
    }

    /// Run only the three per-comment passes, without categorization or
    /// report synthesis. Results are aligned with the input order.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::AlignmentMismatch`] if any pass breaks the
    /// one-result-per-comment invariant.
    pub async fn annotate(
        &self,
        texts: &[String],
    ) -> Result<(Vec<SentimentResult>, Vec<KeywordResult>, Vec<QuestionResult>), NlpError> {
        let (sentiment, keywords, questions) = tokio::join!(
            self.classifier.analyze(texts),
            async { self.keywords.extract(texts) },
            async { self.questions.detect(texts) },
        );

        check_alignment("sentiment", texts.len(), sentiment.len())?;
        check_alignment("keyword", texts.len(), keywords.len())?;
        check_alignment("question", texts.len(), questions.len())?;

        Ok((sentiment, keywords, questions))
    }

    fn empty_analysis() -> Analysis {
        Analysis {
            sentiment: Vec::new(),
            keywords: Vec::new(),
            questions: Vec::new(),
            report: Report {
                summary: "No comments available for analysis.".to_string(),
                sentiment_summary: SentimentSummary::default(),
                categorized_comments: CategorizedComments::default(),
                actionable_insights: vec![
                    "Encourage viewer engagement to collect more comments.".to_string(),
                ],
            },
        }
    }
}

fn check_alignment(pass: &'static str, expected: usize, got: usize) -> Result<(), NlpError> {
    if expected == got {
        Ok(())
    } else {
        Err(NlpError::AlignmentMismatch {
            pass,
            expected,
            got,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;
    use vidpulse_core::RetryPolicy;

    fn offline_pipeline() -> AnalysisPipeline {
        AnalysisPipeline::new(
            SentimentClassifier::lexicon_only(512),
            KeywordExtractor::new(),
            QuestionDetector::new(),
            Categorizer::new(),
            ReportSynthesizer::new(GenerationBackend::Unavailable, RetryPolicy::new(3, 0, 2)),
        )
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn empty_batch_yields_valid_zero_report() {
        let pipeline = offline_pipeline();
        let analysis = pipeline.run(&[], "", 0, 0).await.unwrap();
        assert!(analysis.sentiment.is_empty());
        assert_eq!(analysis.report.sentiment_summary, SentimentSummary::default());
        assert!(!analysis.report.actionable_insights.is_empty());
    }

    #[tokio::test]
    async fn all_passes_align_with_input() {
        let pipeline = offline_pipeline();
        let input = texts(&[
            "Why is the V8 so loud?",
            "This car is amazing!!!",
            "Average fuel economy.",
        ]);
        let analysis = pipeline.run(&input, "a transcript", 100, 5).await.unwrap();

        assert_eq!(analysis.sentiment.len(), input.len());
        assert_eq!(analysis.keywords.len(), input.len());
        assert_eq!(analysis.questions.len(), input.len());
        for (i, text) in input.iter().enumerate() {
            assert_eq!(&analysis.sentiment[i].text, text);
            assert_eq!(&analysis.keywords[i].text, text);
            assert_eq!(&analysis.questions[i].text, text);
        }
    }

    #[tokio::test]
    async fn reference_batch_is_bucketed_as_specified() {
        let pipeline = offline_pipeline();
        let input = texts(&[
            "Why is the V8 so loud?",
            "This car is amazing!!!",
            "Average fuel economy.",
        ]);
        let analysis = pipeline.run(&input, "", 0, 0).await.unwrap();

        assert!(analysis.questions[0].is_question);
        assert!(!analysis.questions[1].is_question);
        assert!(!analysis.questions[2].is_question);

        let buckets = &analysis.report.categorized_comments;
        assert_eq!(buckets.questions, vec![input[0].clone()]);
        assert_eq!(buckets.hot_takes, vec![input[1].clone()]);
        assert!(buckets.most_interesting.is_empty());
    }

    #[tokio::test]
    async fn degraded_mode_still_produces_full_report() {
        let pipeline = offline_pipeline();
        let input = texts(&["love the handling", "worst infotainment ever"]);
        let analysis = pipeline.run(&input, "", 10, 2).await.unwrap();

        let summary = analysis.report.sentiment_summary;
        let total = summary.positive + summary.neutral + summary.negative;
        assert!((total - 100.0).abs() < 0.01);
        assert!(!analysis.report.actionable_insights.is_empty());
        // Every sentiment result carries a label even with no model.
        assert!(analysis
            .sentiment
            .iter()
            .all(|r| matches!(
                r.sentiment,
                SentimentLabel::Positive | SentimentLabel::Neutral | SentimentLabel::Negative
            )));
    }
}
