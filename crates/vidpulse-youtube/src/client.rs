//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with typed response handling for the `videos` and
//! `commentThreads` endpoints. Transient failures (timeouts, 429, 5xx) are
//! retried via the shared [`RetryPolicy`]; API-level errors are surfaced as
//! [`YouTubeError::Api`] and never retried.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use vidpulse_core::RetryPolicy;

use crate::error::{is_transient, YouTubeError};
use crate::types::VideoMetadata;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_TIMEDTEXT_BASE_URL: &str = "https://video.google.com";

/// Comment pages are fetched at the API maximum page size.
const COMMENTS_PAGE_SIZE: usize = 100;

/// Client for the YouTube Data API.
///
/// Use [`YouTubeClient::new`] for production or
/// [`YouTubeClient::with_base_url`] to point at a mock server in tests.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    timedtext_base_url: Url,
    policy: RetryPolicy,
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    #[serde(default)]
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Deserialize, Default)]
struct VideoSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
    dislike_count: Option<String>,
    comment_count: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadsResponse {
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<CommentThread>,
}

#[derive(Deserialize)]
struct CommentThread {
    snippet: CommentThreadSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: TopLevelComment,
}

#[derive(Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default)]
    text_display: String,
}

impl YouTubeClient {
    /// Creates a client pointed at the production Data API.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        policy: RetryPolicy,
    ) -> Result<Self, YouTubeError> {
        Self::with_base_urls(
            api_key,
            timeout_secs,
            policy,
            DEFAULT_BASE_URL,
            DEFAULT_TIMEDTEXT_BASE_URL,
        )
    }

    /// Creates a client with both the API and timedtext hosts pointed at
    /// `base_url` (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// See [`YouTubeClient::with_base_urls`].
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        policy: RetryPolicy,
        base_url: &str,
    ) -> Result<Self, YouTubeError> {
        Self::with_base_urls(api_key, timeout_secs, policy, base_url, base_url)
    }

    /// Creates a client with explicit API and timedtext base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the HTTP client cannot be built, or
    /// [`YouTubeError::Api`] if a base URL does not parse.
    pub fn with_base_urls(
        api_key: &str,
        timeout_secs: u64,
        policy: RetryPolicy,
        base_url: &str,
        timedtext_base_url: &str,
    ) -> Result<Self, YouTubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vidpulse/0.1 (comment-analysis)")
            .build()?;

        let parse = |raw: &str| -> Result<Url, YouTubeError> {
            Url::parse(&format!("{}/", raw.trim_end_matches('/')))
                .map_err(|e| YouTubeError::Api(format!("invalid base URL '{raw}': {e}")))
        };

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parse(base_url)?,
            timedtext_base_url: parse(timedtext_base_url)?,
            policy,
        })
    }

    /// Fetches title, description, and engagement statistics for a video.
    ///
    /// Absent statistics default to zero.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::VideoNotFound`] if the API returns no items.
    /// - [`YouTubeError::Api`] on an API-level error.
    /// - [`YouTubeError::Http`] on network failure once retries are spent.
    pub async fn get_metadata(&self, video_id: &str) -> Result<VideoMetadata, YouTubeError> {
        let url = self.api_url(
            "videos",
            &[("part", "snippet,statistics"), ("id", video_id)],
        );
        let body = self
            .policy
            .run(is_transient, || self.request_json(url.clone()))
            .await?;

        let response: VideosResponse =
            serde_json::from_value(body).map_err(|e| YouTubeError::Deserialize {
                context: format!("videos.list(id={video_id})"),
                source: e,
            })?;

        let Some(item) = response.items.into_iter().next() else {
            return Err(YouTubeError::VideoNotFound(video_id.to_string()));
        };

        Ok(VideoMetadata {
            video_id: video_id.to_string(),
            title: item.snippet.title,
            description: item.snippet.description,
            view_count: parse_count(item.statistics.view_count.as_deref()),
            like_count: parse_count(item.statistics.like_count.as_deref()),
            dislike_count: parse_count(item.statistics.dislike_count.as_deref()),
            comment_count: parse_count(item.statistics.comment_count.as_deref()),
        })
    }

    /// Fetches up to `max_results` top-level comments, paging through
    /// `commentThreads` 100 at a time.
    ///
    /// Returns fewer than `max_results` when the thread list is exhausted,
    /// and an empty list when comments are disabled for the video.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::Api`] on an API-level error other than disabled
    ///   comments.
    /// - [`YouTubeError::Http`] on network failure once retries are spent.
    pub async fn fetch_comments(
        &self,
        video_id: &str,
        max_results: usize,
    ) -> Result<Vec<String>, YouTubeError> {
        let mut comments: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page_size = COMMENTS_PAGE_SIZE.to_string();
            let mut params = vec![
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", page_size.as_str()),
                ("textFormat", "plainText"),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token));
            }
            let url = self.api_url("commentThreads", &params);

            let body = match self
                .policy
                .run(is_transient, || self.request_json(url.clone()))
                .await
            {
                Ok(body) => body,
                Err(YouTubeError::Api(msg)) if msg.contains("commentsDisabled") => {
                    tracing::info!(video_id, "comments are disabled for this video");
                    return Ok(Vec::new());
                }
                Err(e) => return Err(e),
            };

            let page: CommentThreadsResponse =
                serde_json::from_value(body).map_err(|e| YouTubeError::Deserialize {
                    context: format!("commentThreads.list(videoId={video_id})"),
                    source: e,
                })?;

            for thread in page.items {
                comments.push(thread.snippet.top_level_comment.snippet.text_display);
                if comments.len() >= max_results {
                    return Ok(comments);
                }
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(comments)
    }

    pub(crate) fn timedtext_url(&self, video_id: &str, lang: &str) -> Url {
        let mut url = self.timedtext_base_url.clone();
        url.set_path("timedtext");
        url.query_pairs_mut()
            .append_pair("v", video_id)
            .append_pair("lang", lang);
        url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Builds an API request URL with the key and query parameters
    /// percent-encoded via [`Url::query_pairs_mut`].
    fn api_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request and parses the body as JSON.
    ///
    /// Transient statuses (429, 5xx) are surfaced as [`YouTubeError::Http`]
    /// carrying the status so the retry predicate can see them; other
    /// non-2xx statuses become non-retriable [`YouTubeError::Api`] errors
    /// with the API's own message and reason attached.
    async fn request_json(&self, url: Url) -> Result<serde_json::Value, YouTubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            // Guaranteed Err for these statuses.
            response.error_for_status()?;
            return Err(YouTubeError::Api(format!("unexpected status {status}")));
        }

        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
            let message = body["error"]["message"].as_str().unwrap_or("unknown error");
            let reason = body["error"]["errors"][0]["reason"].as_str().unwrap_or("");
            return Err(YouTubeError::Api(format!("{status}: {message} {reason}")));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| YouTubeError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> YouTubeClient {
        YouTubeClient::with_base_url("test-key", 30, RetryPolicy::new(3, 0, 2), base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn api_url_constructs_correct_query_string() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.api_url("videos", &[("part", "snippet,statistics"), ("id", "abc")]);
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/videos?key=test-key&part=snippet%2Cstatistics&id=abc"
        );
    }

    #[test]
    fn api_url_strips_trailing_slash() {
        let client = test_client("https://www.googleapis.com/youtube/v3/");
        let url = client.api_url("commentThreads", &[("videoId", "abc")]);
        assert!(
            url.as_str()
                .starts_with("https://www.googleapis.com/youtube/v3/commentThreads?"),
            "got {url}"
        );
    }

    #[test]
    fn timedtext_url_targets_timedtext_path() {
        let client = test_client("http://localhost:9999");
        let url = client.timedtext_url("abc123def45", "en");
        assert_eq!(
            url.as_str(),
            "http://localhost:9999/timedtext?v=abc123def45&lang=en"
        );
    }

    #[test]
    fn parse_count_defaults_to_zero() {
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some("not-a-number")), 0);
        assert_eq!(parse_count(Some("1234")), 1234);
    }
}
