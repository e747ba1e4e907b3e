//! Comment-analysis pipeline for VidPulse.
//!
//! Takes one batch of raw viewer comments, runs three independent
//! order-preserving passes (sentiment, keywords, question detection),
//! buckets comments into most-interesting / hot-takes / questions, and
//! synthesizes a natural-language report via an external generation model.
//! Every external capability degrades to a documented fallback, so the
//! pipeline always produces a structurally valid [`Report`].

pub mod categorize;
pub mod error;
pub mod generation;
pub mod keywords;
pub mod pipeline;
pub mod preprocess;
pub mod questions;
pub mod report;
pub mod sentiment;
pub mod types;

mod lexicon;
mod tagger;

pub use categorize::Categorizer;
pub use error::NlpError;
pub use generation::{GenerationBackend, GenerationClient};
pub use keywords::KeywordExtractor;
pub use pipeline::AnalysisPipeline;
pub use preprocess::preprocess;
pub use questions::QuestionDetector;
pub use report::ReportSynthesizer;
pub use sentiment::SentimentClassifier;
pub use types::{
    Analysis, CategorizedComments, KeywordResult, QuestionResult, Report, SentimentLabel,
    SentimentResult, SentimentSummary,
};
