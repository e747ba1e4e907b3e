use std::path::{Path as FsPath, PathBuf};

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use vidpulse_export::ExportError;
use vidpulse_nlp::Analysis;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum ExportFormat {
    Json,
    Csv,
    Pdf,
}

#[derive(Debug, Serialize)]
pub(super) struct ExportData {
    pub filename: String,
}

impl ExportFormat {
    pub(super) fn write(
        self,
        analysis: &Analysis,
        output_dir: &FsPath,
    ) -> Result<PathBuf, ExportError> {
        match self {
            Self::Json => vidpulse_export::export_json(analysis, output_dir),
            Self::Csv => vidpulse_export::export_csv(analysis, output_dir),
            Self::Pdf => vidpulse_export::export_pdf(analysis, output_dir),
        }
    }
}

pub(super) fn map_export_error(request_id: String, error: &ExportError) -> ApiError {
    match error {
        // A misaligned bundle is a caller mistake, not a server fault.
        ExportError::Misaligned { .. } => {
            tracing::warn!(error = %error, "rejecting caller-assembled export bundle");
            ApiError::new(request_id, "bad_request", error.to_string())
        }
        _ => {
            tracing::error!(error = %error, "export failed");
            ApiError::new(request_id, "internal_error", "export failed")
        }
    }
}

/// Writes a previously computed analysis bundle to disk in the requested
/// format and returns the file path.
pub(super) async fn export_analysis(
    State(state): State<AppState>,
    Path(format): Path<ExportFormat>,
    Extension(req_id): Extension<RequestId>,
    Json(analysis): Json<Analysis>,
) -> Result<Json<ApiResponse<ExportData>>, ApiError> {
    let path = format
        .write(&analysis, &state.export_dir)
        .map_err(|e| map_export_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ExportData {
            filename: path.display().to_string(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::api::tests::{body_json, offline_app, post_json};

    fn analysis_body() -> serde_json::Value {
        json!({
            "sentiment": [
                { "text": "great wheels", "sentiment": "Positive", "confidence": 0.99 }
            ],
            "keywords": [
                { "text": "great wheels", "keywords": ["wheels"] }
            ],
            "questions": [
                { "text": "great wheels", "is_question": false }
            ],
            "report": {
                "summary": "Positive reception.",
                "sentiment_summary": { "Positive": 100.0, "Neutral": 0.0, "Negative": 0.0 },
                "categorized_comments": {
                    "most_interesting": [],
                    "hot_takes": [],
                    "questions": []
                },
                "actionable_insights": ["Keep it up."]
            }
        })
    }

    #[tokio::test]
    async fn export_csv_writes_file_and_returns_filename() {
        let dir = tempfile::tempdir().unwrap();
        let app = offline_app("http://localhost:9", dir.path().to_path_buf());
        let response = app
            .oneshot(post_json("/api/v1/export/csv", &analysis_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let filename = body["data"]["filename"].as_str().unwrap();
        assert!(filename.ends_with(".csv"));
        assert!(std::path::Path::new(filename).exists());
    }

    #[tokio::test]
    async fn misaligned_bundle_is_a_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let app = offline_app("http://localhost:9", dir.path().to_path_buf());

        let mut bundle = analysis_body();
        bundle["questions"] = json!([]);
        let response = app
            .oneshot(post_json("/api/v1/export/csv", &bundle))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"].as_str(), Some("bad_request"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn unknown_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = offline_app("http://localhost:9", dir.path().to_path_buf());
        let response = app
            .oneshot(post_json("/api/v1/export/xml", &analysis_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
