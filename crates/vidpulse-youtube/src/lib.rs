//! YouTube Data API client for VidPulse.
//!
//! Fetches video metadata, paginated comment threads, and timedtext
//! transcripts. Transient upstream errors (429, 5xx) are retried with the
//! shared back-off policy; transcript absence is a normal empty result,
//! never an error.

pub mod client;
pub mod error;
pub mod transcript;
pub mod types;
pub mod video_id;


pub use client::YouTubeClient;
pub use error::YouTubeError;
pub use types::VideoMetadata;
pub use video_id::extract_video_id;
