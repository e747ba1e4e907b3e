//! Client for the external text-generation (chat) API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NlpError;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Whether report prose can be generated at all. Decided once at startup
/// from configuration; `Unavailable` is a constructed state, not an error
/// discovered at call time.
pub enum GenerationBackend {
    Remote(GenerationClient),
    Unavailable,
}

/// Cohere-style chat client: `POST {base}/v1/chat` with a bearer key,
/// returning `{ "text": ... }`.
pub struct GenerationClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    text: String,
}

impl GenerationClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Result<Self, NlpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vidpulse/0.1 (comment-analysis)")
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/v1/chat", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    /// Generate text for one prompt.
    ///
    /// # Errors
    ///
    /// - [`NlpError::Http`] on network failure or non-2xx HTTP status.
    /// - [`NlpError::Generation`] if the response body cannot be parsed.
    pub async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, NlpError> {
        let request = ChatRequest {
            model: &self.model,
            message: prompt,
            max_tokens,
            temperature,
        };
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| NlpError::Generation(format!("chat response parse error: {e}")))?;

        Ok(body.text.trim().to_string())
    }
}

/// Transient-error predicate for the generation retry loop: network-level
/// failures and 5xx / 429 responses are worth another attempt; parse errors
/// and auth failures are not.
pub(crate) fn is_transient(err: &NlpError) -> bool {
    match err {
        NlpError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status().is_some_and(|s| {
                    s.is_server_error() || s == reqwest::StatusCode::TOO_MANY_REQUESTS
                })
        }
        NlpError::Inference(_) | NlpError::Generation(_) | NlpError::AlignmentMismatch { .. } => {
            false
        }
    }
}
