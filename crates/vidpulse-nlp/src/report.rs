//! Report synthesis: sentiment roll-up, prompt assembly, retried
//! generation, and rule-based actionable insights.

use vidpulse_core::RetryPolicy;

use crate::generation::{is_transient, GenerationBackend};
use crate::types::{CategorizedComments, Report, SentimentLabel, SentimentResult, SentimentSummary};

/// Character budget for the transcript excerpt embedded in the prompt.
const TRANSCRIPT_BUDGET: usize = 1000;

/// Example comments quoted per bucket in the prompt.
const EXAMPLES_PER_BUCKET: usize = 3;

const GENERATION_MAX_TOKENS: u32 = 500;
const GENERATION_TEMPERATURE: f32 = 0.7;

pub struct ReportSynthesizer {
    backend: GenerationBackend,
    policy: RetryPolicy,
}

impl ReportSynthesizer {
    #[must_use]
    pub fn new(backend: GenerationBackend, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    /// Build the full report for one analyzed batch. Never fails: when
    /// generation is unavailable or retries are exhausted, the summary
    /// explains the failure and the insights include a remediation step.
    pub async fn generate(
        &self,
        transcript: &str,
        likes: u64,
        dislikes: u64,
        sentiment_results: &[SentimentResult],
        categorized: &CategorizedComments,
    ) -> Report {
        let sentiment_summary = summarize_sentiment(sentiment_results);
        let mut insights = derive_insights(&sentiment_summary, categorized);

        let prompt = build_prompt(
            transcript,
            likes,
            dislikes,
            &sentiment_summary,
            categorized,
        );

        let summary = match &self.backend {
            GenerationBackend::Remote(client) => {
                let outcome = self
                    .policy
                    .run(is_transient, || {
                        client.generate(&prompt, GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE)
                    })
                    .await;
                match outcome {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!(error = %e, "report generation failed after retries");
                        insights.insert(
                            0,
                            "Check connectivity and generation API credentials, then retry \
                             report generation."
                                .to_string(),
                        );
                        format!(
                            "Report generation is unavailable ({e}). The sentiment statistics \
                             and comment categories in this report were computed locally and \
                             remain valid."
                        )
                    }
                }
            }
            GenerationBackend::Unavailable => {
                insights.insert(
                    0,
                    "Configure a generation API key to enable narrative summaries.".to_string(),
                );
                "Report generation is not configured. The sentiment statistics and comment \
                 categories in this report were computed locally and remain valid."
                    .to_string()
            }
        };

        Report {
            summary,
            sentiment_summary,
            categorized_comments: categorized.clone(),
            actionable_insights: insights,
        }
    }
}

/// Tally per-comment sentiment into percentages of the batch.
///
/// An empty batch yields all zeros — never a division by zero.
#[must_use]
pub fn summarize_sentiment(results: &[SentimentResult]) -> SentimentSummary {
    if results.is_empty() {
        return SentimentSummary::default();
    }
    let mut positive = 0usize;
    let mut neutral = 0usize;
    let mut negative = 0usize;
    for r in results {
        match r.sentiment {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Neutral => neutral += 1,
            SentimentLabel::Negative => negative += 1,
        }
    }
    #[allow(clippy::cast_precision_loss)]
    let total = results.len() as f32;
    #[allow(clippy::cast_precision_loss)]
    SentimentSummary {
        positive: positive as f32 / total * 100.0,
        neutral: neutral as f32 / total * 100.0,
        negative: negative as f32 / total * 100.0,
    }
}

fn truncate_transcript(transcript: &str) -> String {
    if transcript.chars().count() <= TRANSCRIPT_BUDGET {
        return transcript.to_string();
    }
    tracing::info!(
        budget = TRANSCRIPT_BUDGET,
        len = transcript.chars().count(),
        "truncating transcript for prompt"
    );
    let mut excerpt: String = transcript.chars().take(TRANSCRIPT_BUDGET).collect();
    excerpt.push('…');
    excerpt
}

fn bucket_examples(bucket: &[String]) -> String {
    if bucket.is_empty() {
        return "(none)".to_string();
    }
    bucket
        .iter()
        .take(EXAMPLES_PER_BUCKET)
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_prompt(
    transcript: &str,
    likes: u64,
    dislikes: u64,
    summary: &SentimentSummary,
    categorized: &CategorizedComments,
) -> String {
    format!(
        "Video transcript excerpt:\n{transcript}\n\n\
         Likes: {likes} | Dislikes: {dislikes}\n\n\
         Sentiment of viewer comments:\n\
         Positive: {positive:.1}%\nNeutral: {neutral:.1}%\nNegative: {negative:.1}%\n\n\
         Comment highlights:\n\
         Most interesting:\n{interesting}\n\n\
         Hot takes:\n{hot}\n\n\
         Questions:\n{questions}\n\n\
         Write a professional report summarizing how viewers responded to this video. \
         Include concrete suggestions for improvement.",
        transcript = truncate_transcript(transcript),
        positive = summary.positive,
        neutral = summary.neutral,
        negative = summary.negative,
        interesting = bucket_examples(&categorized.most_interesting),
        hot = bucket_examples(&categorized.hot_takes),
        questions = bucket_examples(&categorized.questions),
    )
}

/// Deterministic insights from the sentiment distribution and buckets.
/// Always returns at least one insight.
fn derive_insights(summary: &SentimentSummary, categorized: &CategorizedComments) -> Vec<String> {
    let mut insights = Vec::new();
    if summary.negative > 20.0 {
        insights.push(
            "Over 20% of comments are negative — address the recurring criticism directly in \
             a follow-up video or pinned comment."
                .to_string(),
        );
    }
    if !categorized.questions.is_empty() {
        insights.push(
            "Viewers are asking questions — create FAQ content or a pinned comment answering \
             the most common ones."
                .to_string(),
        );
    }
    if summary.positive > 60.0 {
        insights.push(
            "Over 60% of comments are positive — highlight the features viewers praise in \
             future content."
                .to_string(),
        );
    }
    if insights.is_empty() {
        insights.push(
            "Sentiment is mixed — review the categorized comments for themes worth a closer \
             look."
                .to_string(),
        );
    }
    insights
}
