//! Video-identifier extraction from user-supplied URLs.

use std::sync::LazyLock;

use regex::Regex;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})(?:[?&#/]|$)").expect("valid video-id regex")
});

/// Extract the 11-character video identifier from a YouTube URL.
///
/// Handles `watch?v=`, `youtu.be/`, `/shorts/`, and `/embed/` forms. The
/// identifier alphabet is `[0-9A-Za-z_-]`, always exactly 11 characters.
/// Returns `None` when no identifier token can be found.
#[must_use]
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_with_extra_query_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_shorts_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn rejects_urls_without_an_id() {
        assert_eq!(extract_video_id("https://www.youtube.com/feed/library"), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn rejects_too_short_tokens() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=short"), None);
    }
}
