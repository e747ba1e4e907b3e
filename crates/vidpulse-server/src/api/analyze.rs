use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use vidpulse_nlp::{KeywordResult, QuestionResult, Report, SentimentResult};

use crate::middleware::RequestId;

use super::{map_nlp_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeCommentsRequest {
    pub texts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeCommentsData {
    pub sentiment: Vec<SentimentResult>,
    pub keywords: Vec<KeywordResult>,
    pub questions: Vec<QuestionResult>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeReportRequest {
    pub texts: Vec<String>,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
}

/// Runs the three per-comment passes over a caller-supplied batch.
pub(super) async fn analyze_comments(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<AnalyzeCommentsRequest>,
) -> Result<Json<ApiResponse<AnalyzeCommentsData>>, ApiError> {
    let (sentiment, keywords, questions) = state
        .pipeline
        .annotate(&request.texts)
        .await
        .map_err(|e| map_nlp_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: AnalyzeCommentsData {
            sentiment,
            keywords,
            questions,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Runs the full pipeline and returns only the synthesized report.
pub(super) async fn analyze_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<AnalyzeReportRequest>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    let analysis = state
        .pipeline
        .run(
            &request.texts,
            &request.transcript,
            request.likes,
            request.dislikes,
        )
        .await
        .map_err(|e| map_nlp_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: analysis.report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::api::tests::{body_json, offline_app, post_json};

    #[tokio::test]
    async fn analyze_comments_returns_aligned_passes() {
        let app = offline_app("http://localhost:9", PathBuf::from("/tmp"));
        let response = app
            .oneshot(post_json(
                "/api/v1/analyze/comments",
                &json!({ "texts": ["Why is the V8 so loud?", "This car is amazing!!!"] }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["sentiment"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["data"]["keywords"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["data"]["questions"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["data"]["questions"][0]["is_question"], json!(true));
        assert_eq!(body["data"]["questions"][1]["is_question"], json!(false));
    }

    #[tokio::test]
    async fn analyze_report_degrades_to_well_formed_report() {
        let app = offline_app("http://localhost:9", PathBuf::from("/tmp"));
        let response = app
            .oneshot(post_json(
                "/api/v1/analyze/report",
                &json!({ "texts": ["love the handling"], "likes": 10 }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["data"]["summary"].is_string());
        assert!(body["data"]["sentiment_summary"]["Positive"].is_number());
        assert!(!body["data"]["actionable_insights"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn empty_batch_yields_zero_report_not_an_error() {
        let app = offline_app("http://localhost:9", PathBuf::from("/tmp"));
        let response = app
            .oneshot(post_json(
                "/api/v1/analyze/report",
                &json!({ "texts": [] }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["data"]["summary"].as_str(),
            Some("No comments available for analysis.")
        );
    }
}
