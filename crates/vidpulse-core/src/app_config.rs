use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub youtube_api_key: String,
    /// Base URL of the remote sentiment inference service. When unset the
    /// classifier runs in lexicon-only mode.
    pub sentiment_url: Option<String>,
    pub cohere_api_key: Option<String>,
    pub cohere_base_url: String,
    pub generation_model: String,
    pub max_comments: usize,
    pub max_comment_length: usize,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub export_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("youtube_api_key", &"[redacted]")
            .field("sentiment_url", &self.sentiment_url)
            .field(
                "cohere_api_key",
                &self.cohere_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("cohere_base_url", &self.cohere_base_url)
            .field("generation_model", &self.generation_model)
            .field("max_comments", &self.max_comments)
            .field("max_comment_length", &self.max_comment_length)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("export_dir", &self.export_dir)
            .finish()
    }
}
