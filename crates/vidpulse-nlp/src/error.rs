use thiserror::Error;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference error: {0}")]
    Inference(String),

    #[error("generation error: {0}")]
    Generation(String),

    /// A classifier pass returned a different number of results than it was
    /// given inputs. This is an internal defect, not a data-quality issue,
    /// and must never be papered over by truncating or zipping.
    #[error("alignment mismatch in {pass} pass: expected {expected} results, got {got}")]
    AlignmentMismatch {
        pass: &'static str,
        expected: usize,
        got: usize,
    },
}
