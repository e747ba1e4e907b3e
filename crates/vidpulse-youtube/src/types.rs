use serde::{Deserialize, Serialize};

/// Video metadata from the `videos.list` endpoint. Absent statistics
/// default to zero; absent text fields default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub view_count: u64,
    pub like_count: u64,
    pub dislike_count: u64,
    pub comment_count: u64,
}
