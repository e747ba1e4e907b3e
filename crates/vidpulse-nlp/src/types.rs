use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::Negative => write!(f, "Negative"),
        }
    }
}

/// Per-comment sentiment, order-preserving with the input batch.
///
/// Confidence below the adoption threshold forces the label to Neutral,
/// but the raw confidence is kept as the model returned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub text: String,
    pub sentiment: SentimentLabel,
    pub confidence: f32,
}

/// Per-comment keywords. Never empty: extraction that yields nothing
/// falls back to a fixed default set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordResult {
    pub text: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub text: String,
    pub is_question: bool,
}

/// Mutually exclusive comment buckets, each capped at a fixed maximum,
/// insertion order preserved up to the cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedComments {
    pub most_interesting: Vec<String>,
    pub hot_takes: Vec<String>,
    pub questions: Vec<String>,
}

/// Share of the batch per sentiment label, in percent.
///
/// Sums to 100 (up to rounding) for a non-empty batch, all zero otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    #[serde(rename = "Positive")]
    pub positive: f32,
    #[serde(rename = "Neutral")]
    pub neutral: f32,
    #[serde(rename = "Negative")]
    pub negative: f32,
}

/// Final synthesized report. Immutable once the orchestrator returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub summary: String,
    pub sentiment_summary: SentimentSummary,
    pub categorized_comments: CategorizedComments,
    pub actionable_insights: Vec<String>,
}

/// Full analysis for one comment batch: the three aligned per-comment
/// passes plus the synthesized report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment: Vec<SentimentResult>,
    pub keywords: Vec<KeywordResult>,
    pub questions: Vec<QuestionResult>,
    pub report: Report,
}
