//! Timedtext transcript fetching.
//!
//! Transcripts are best-effort: many videos have none, and YouTube serves
//! an empty body rather than an error status when captions are disabled.
//! Every failure path therefore collapses to an empty string — transcript
//! absence is a normal result, not an error.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::client::YouTubeClient;

impl YouTubeClient {
    /// Fetches the English transcript for a video, joined into one string.
    ///
    /// Returns `""` when the video has no captions, the endpoint fails, or
    /// the payload cannot be parsed.
    pub async fn fetch_transcript(&self, video_id: &str) -> String {
        let url = self.timedtext_url(video_id, "en");
        let response = match self.http().get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(video_id, error = %e, "transcript fetch failed");
                return String::new();
            }
        };

        if !response.status().is_success() {
            tracing::info!(
                video_id,
                status = %response.status(),
                "transcript unavailable"
            );
            return String::new();
        }

        let xml = response.text().await.unwrap_or_default();
        if xml.trim().is_empty() {
            tracing::info!(video_id, "no captions for this video");
            return String::new();
        }

        parse_timedtext(&xml)
    }
}

/// Parse a timedtext XML payload (`<transcript><text ...>…</text>…`) into
/// one space-joined string. Malformed XML yields whatever was collected
/// before the parse broke down.
fn parse_timedtext(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut segments: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                in_text = e.name().as_ref() == b"text";
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"text" {
                    in_text = false;
                }
            }
            Ok(Event::Text(e)) => {
                if in_text {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    if !text.is_empty() {
                        segments.push(text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::warn!(error = %e, "timedtext parse error");
                break;
            }
            Ok(_) => {}
        }
    }

    segments.join(" ")
}
