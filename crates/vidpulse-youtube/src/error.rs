use thiserror::Error;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API error: {0}")]
    Api(String),

    #[error("video not found: {0}")]
    VideoNotFound(String),

    #[error("response deserialize error in {context}: {source}")]
    Deserialize {
        context: String,
        source: serde_json::Error,
    },
}

/// Returns `true` for errors worth retrying after a back-off delay:
/// network-level failures, 5xx responses, and 429 rate limiting.
pub(crate) fn is_transient(err: &YouTubeError) -> bool {
    match err {
        YouTubeError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status().is_some_and(|s| {
                    s.is_server_error() || s == reqwest::StatusCode::TOO_MANY_REQUESTS
                })
        }
        YouTubeError::Api(_)
        | YouTubeError::VideoNotFound(_)
        | YouTubeError::Deserialize { .. } => false,
    }
}
