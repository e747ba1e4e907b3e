//! One-shot export of a computed analysis to JSON, CSV, or PDF files.
//!
//! Exports serialize an already-computed [`Analysis`](vidpulse_nlp::Analysis);
//! nothing here re-runs any classification. Filenames are timestamped and
//! returned to the caller.

use std::path::{Path, PathBuf};

use thiserror::Error;

mod pdf;
mod sheet;

pub use pdf::export_pdf;
pub use sheet::{export_csv, export_json};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PDF write error: {0}")]
    Pdf(String),

    /// The per-comment result vectors disagree on length. The pipeline
    /// never produces this; it means the caller assembled the bundle.
    #[error(
        "misaligned analysis: {sentiment} sentiment, {keywords} keyword, {questions} question results"
    )]
    Misaligned {
        sentiment: usize,
        keywords: usize,
        questions: usize,
    },
}

/// Builds `output_dir/sentiment_results_<timestamp>.<ext>`, creating the
/// directory if needed.
pub(crate) fn timestamped_path(output_dir: &Path, ext: &str) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(output_dir)?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    Ok(output_dir.join(format!("sentiment_results_{timestamp}.{ext}")))
}
