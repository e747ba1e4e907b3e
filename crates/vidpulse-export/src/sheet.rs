//! JSON and CSV export.

use std::path::{Path, PathBuf};

use vidpulse_nlp::Analysis;

use crate::{timestamped_path, ExportError};

/// Writes the full analysis as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ExportError::Io`] or [`ExportError::Json`] if the directory,
/// file, or serialization fails.
pub fn export_json(analysis: &Analysis, output_dir: &Path) -> Result<PathBuf, ExportError> {
    let path = timestamped_path(output_dir, "json")?;
    let json = serde_json::to_string_pretty(analysis)?;
    std::fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "exported JSON");
    Ok(path)
}

/// Writes one CSV row per comment: text, sentiment, confidence,
/// comma-joined keywords, and the question flag.
///
/// Rows are zipped positionally from the three per-comment result
/// vectors, so their lengths are checked first: a hand-assembled bundle
/// with mismatched vectors is rejected rather than silently truncated.
///
/// # Errors
///
/// Returns [`ExportError::Misaligned`] when the result vectors disagree
/// on length, [`ExportError::Io`] or [`ExportError::Csv`] on write
/// failure.
pub fn export_csv(analysis: &Analysis, output_dir: &Path) -> Result<PathBuf, ExportError> {
    if analysis.keywords.len() != analysis.sentiment.len()
        || analysis.questions.len() != analysis.sentiment.len()
    {
        return Err(ExportError::Misaligned {
            sentiment: analysis.sentiment.len(),
            keywords: analysis.keywords.len(),
            questions: analysis.questions.len(),
        });
    }

    let path = timestamped_path(output_dir, "csv")?;
    let mut writer = csv::Writer::from_path(&path)?;

    writer.write_record(["text", "sentiment", "confidence", "keywords", "is_question"])?;
    for ((s, k), q) in analysis
        .sentiment
        .iter()
        .zip(&analysis.keywords)
        .zip(&analysis.questions)
    {
        writer.write_record([
            s.text.as_str(),
            &s.sentiment.to_string(),
            &format!("{:.4}", s.confidence),
            &k.keywords.join(", "),
            &q.is_question.to_string(),
        ])?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), rows = analysis.sentiment.len(), "exported CSV");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidpulse_nlp::{
        CategorizedComments, KeywordResult, QuestionResult, Report, SentimentLabel,
        SentimentResult, SentimentSummary,
    };

    fn sample_analysis() -> Analysis {
        Analysis {
            sentiment: vec![
                SentimentResult {
                    text: "Why is the V8 so loud?".to_string(),
                    sentiment: SentimentLabel::Neutral,
                    confidence: 0.61,
                },
                SentimentResult {
                    text: "This car is amazing!!!".to_string(),
                    sentiment: SentimentLabel::Positive,
                    confidence: 0.99,
                },
            ],
            keywords: vec![
                KeywordResult {
                    text: "Why is the V8 so loud?".to_string(),
                    keywords: vec!["v8".to_string(), "loud".to_string()],
                },
                KeywordResult {
                    text: "This car is amazing!!!".to_string(),
                    keywords: vec!["car".to_string()],
                },
            ],
            questions: vec![
                QuestionResult {
                    text: "Why is the V8 so loud?".to_string(),
                    is_question: true,
                },
                QuestionResult {
                    text: "This car is amazing!!!".to_string(),
                    is_question: false,
                },
            ],
            report: Report {
                summary: "Viewers responded well.".to_string(),
                sentiment_summary: SentimentSummary {
                    positive: 50.0,
                    neutral: 50.0,
                    negative: 0.0,
                },
                categorized_comments: CategorizedComments {
                    most_interesting: vec![],
                    hot_takes: vec!["This car is amazing!!!".to_string()],
                    questions: vec!["Why is the V8 so loud?".to_string()],
                },
                actionable_insights: vec!["Create FAQ content.".to_string()],
            },
        }
    }

    #[test]
    fn json_round_trip_preserves_report_fields() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = sample_analysis();
        let path = export_json(&analysis, dir.path()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let restored: Analysis = serde_json::from_str(&raw).unwrap();

        assert_eq!(
            restored.report.sentiment_summary,
            analysis.report.sentiment_summary
        );
        assert_eq!(
            restored.report.categorized_comments,
            analysis.report.categorized_comments
        );
        assert_eq!(
            restored.report.actionable_insights,
            analysis.report.actionable_insights
        );
    }

    #[test]
    fn json_filename_is_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_json(&sample_analysis(), dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("sentiment_results_"), "got {name}");
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn csv_has_header_and_one_row_per_comment() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_csv(&sample_analysis(), dir.path()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec![
                "text",
                "sentiment",
                "confidence",
                "keywords",
                "is_question"
            ])
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Neutral");
        assert_eq!(&rows[0][3], "v8, loud");
        assert_eq!(&rows[0][4], "true");
        assert_eq!(&rows[1][1], "Positive");
    }

    #[test]
    fn csv_rejects_misaligned_result_vectors() {
        let dir = tempfile::tempdir().unwrap();
        let mut analysis = sample_analysis();
        analysis.questions.pop();

        let err = export_csv(&analysis, dir.path()).unwrap_err();
        assert!(
            matches!(
                err,
                ExportError::Misaligned {
                    sentiment: 2,
                    keywords: 2,
                    questions: 1
                }
            ),
            "got {err}"
        );
        // Nothing is written for a rejected bundle.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
