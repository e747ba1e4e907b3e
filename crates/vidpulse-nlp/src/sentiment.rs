//! Batch sentiment classification behind a stable, always-aligned interface.

use serde::{Deserialize, Serialize};

use crate::error::NlpError;
use crate::lexicon;
use crate::types::{SentimentLabel, SentimentResult};

/// Maximum number of texts per remote classification call.
const BATCH_SIZE: usize = 50;

/// Raw labels below this confidence are downgraded to Neutral.
const CONFIDENCE_FLOOR: f32 = 0.95;

/// Confidence reported when the whole batch falls back to Neutral.
const FALLBACK_CONFIDENCE: f32 = 0.5;

/// HTTP client for a TEI-style text-classification service.
///
/// `POST {base}/predict` with `{"inputs": [...]}`, returning one list of
/// `{label, score}` candidates per input, best first.
pub(crate) struct InferenceClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPrediction {
    pub label: String,
    pub score: f32,
}

impl InferenceClient {
    #[must_use]
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/predict", base_url.trim_end_matches('/')),
        }
    }

    /// Classify one chunk of texts. Returns the top prediction per input,
    /// in input order.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::Inference`] if the request fails, the response
    /// cannot be parsed, or the service returns a misaligned result set.
    pub(crate) async fn classify(&self, texts: &[&str]) -> Result<Vec<RawPrediction>, NlpError> {
        let request = PredictRequest { inputs: texts };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| NlpError::Inference(format!("inference request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(NlpError::Inference(format!(
                "inference service returned status {}",
                response.status()
            )));
        }

        let candidates: Vec<Vec<RawPrediction>> = response
            .json()
            .await
            .map_err(|e| NlpError::Inference(format!("inference response parse error: {e}")))?;

        if candidates.len() != texts.len() {
            return Err(NlpError::Inference(format!(
                "inference service returned {} results for {} inputs",
                candidates.len(),
                texts.len()
            )));
        }

        candidates
            .into_iter()
            .map(|mut c| {
                if c.is_empty() {
                    Err(NlpError::Inference(
                        "inference service returned an empty candidate list".to_string(),
                    ))
                } else {
                    Ok(c.remove(0))
                }
            })
            .collect()
    }
}

/// How sentiment scores are produced. Chosen once at construction; the
/// degraded mode is a state the classifier is built in, not a flag flipped
/// at call sites.
enum Backend {
    Remote(InferenceClient),
    Lexicon,
}

pub struct SentimentClassifier {
    backend: Backend,
    max_text_length: usize,
}

impl SentimentClassifier {
    /// Classifier backed by a remote inference service.
    #[must_use]
    pub fn remote(base_url: &str, max_text_length: usize) -> Self {
        Self {
            backend: Backend::Remote(InferenceClient::new(base_url)),
            max_text_length,
        }
    }

    /// Heuristic-only classifier scoring with the opinion lexicon.
    #[must_use]
    pub fn lexicon_only(max_text_length: usize) -> Self {
        Self {
            backend: Backend::Lexicon,
            max_text_length,
        }
    }

    /// Classify a batch of texts.
    ///
    /// Always returns exactly one result per input, in input order. A fatal
    /// failure of the remote service degrades the entire batch to
    /// `{Neutral, 0.5}` rather than failing partially or misaligning.
    pub async fn analyze(&self, texts: &[String]) -> Vec<SentimentResult> {
        let truncated: Vec<String> = texts.iter().map(|t| self.truncate(t)).collect();

        let raw = match &self.backend {
            Backend::Remote(client) => match self.classify_all(client, &truncated).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        count = texts.len(),
                        "sentiment inference failed for batch — degrading to neutral"
                    );
                    return texts
                        .iter()
                        .map(|t| SentimentResult {
                            text: t.clone(),
                            sentiment: SentimentLabel::Neutral,
                            confidence: FALLBACK_CONFIDENCE,
                        })
                        .collect();
                }
            },
            Backend::Lexicon => truncated
                .iter()
                .map(|t| {
                    let score = lexicon::lexicon_score(t);
                    RawPrediction {
                        label: if score > 0.0 {
                            "positive".to_string()
                        } else if score < 0.0 {
                            "negative".to_string()
                        } else {
                            "neutral".to_string()
                        },
                        score: lexicon::opinion_confidence(t),
                    }
                })
                .collect(),
        };

        texts
            .iter()
            .zip(raw)
            .map(|(text, pred)| {
                let raw_label = parse_label(&pred.label);
                // Confidence below the floor forces Neutral; the raw
                // confidence is still recorded as returned.
                let sentiment = if pred.score >= CONFIDENCE_FLOOR {
                    raw_label
                } else {
                    SentimentLabel::Neutral
                };
                SentimentResult {
                    text: text.clone(),
                    sentiment,
                    confidence: pred.score,
                }
            })
            .collect()
    }

    /// Fresh confidence score for one comment, used by the categorizer.
    ///
    /// Remote failures fall back to the lexicon-derived confidence so
    /// categorization keeps working in degraded mode.
    pub async fn score_one(&self, text: &str) -> f32 {
        let truncated = self.truncate(text);
        match &self.backend {
            Backend::Remote(client) => match client.classify(&[truncated.as_str()]).await {
                Ok(preds) => preds.first().map_or(FALLBACK_CONFIDENCE, |p| p.score),
                Err(e) => {
                    tracing::debug!(error = %e, "single-comment scoring failed — using lexicon");
                    lexicon::opinion_confidence(&truncated)
                }
            },
            Backend::Lexicon => lexicon::opinion_confidence(&truncated),
        }
    }

    async fn classify_all(
        &self,
        client: &InferenceClient,
        texts: &[String],
    ) -> Result<Vec<RawPrediction>, NlpError> {
        let mut all = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(BATCH_SIZE) {
            let refs: Vec<&str> = chunk.iter().map(String::as_str).collect();
            all.extend(client.classify(&refs).await?);
        }
        Ok(all)
    }

    fn truncate(&self, text: &str) -> String {
        if text.chars().count() <= self.max_text_length {
            return text.to_string();
        }
        tracing::info!(
            max = self.max_text_length,
            len = text.chars().count(),
            "truncating comment before classification"
        );
        text.chars().take(self.max_text_length).collect()
    }
}

/// Map a raw model label onto [`SentimentLabel`]. Unknown labels are
/// treated as Neutral. Handles both word labels and the `LABEL_n`
/// convention of sentiment models with anonymous heads.
fn parse_label(raw: &str) -> SentimentLabel {
    match raw.to_lowercase().as_str() {
        "positive" | "pos" | "label_2" => SentimentLabel::Positive,
        "negative" | "neg" | "label_0" => SentimentLabel::Negative,
        _ => SentimentLabel::Neutral,
    }
}
