mod analyze;
mod export;
mod reports;
mod youtube;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use vidpulse_nlp::{AnalysisPipeline, NlpError};
use vidpulse_youtube::{YouTubeClient, YouTubeError};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub youtube: Arc<YouTubeClient>,
    pub export_dir: PathBuf,
    pub max_comments: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Resolves a user-supplied video URL to an 11-character identifier, or a
/// `bad_request` rejection when no identifier can be extracted.
pub(super) fn resolve_video_id(request_id: &str, url: &str) -> Result<String, ApiError> {
    vidpulse_youtube::extract_video_id(url).ok_or_else(|| {
        ApiError::new(
            request_id.to_owned(),
            "bad_request",
            format!("could not extract a video id from '{url}'"),
        )
    })
}

pub(super) fn map_youtube_error(request_id: String, error: &YouTubeError) -> ApiError {
    tracing::warn!(error = %error, "upstream YouTube request failed");
    match error {
        YouTubeError::VideoNotFound(id) => {
            ApiError::new(request_id, "not_found", format!("video not found: {id}"))
        }
        YouTubeError::Http(_) | YouTubeError::Api(_) | YouTubeError::Deserialize { .. } => {
            ApiError::new(request_id, "upstream_error", error.to_string())
        }
    }
}

pub(super) fn map_nlp_error(request_id: String, error: &NlpError) -> ApiError {
    tracing::error!(error = %error, "analysis pipeline failed");
    ApiError::new(request_id, "internal_error", "analysis failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyze/comments", post(analyze::analyze_comments))
        .route("/api/v1/analyze/report", post(analyze::analyze_report))
        .route("/api/v1/youtube/metadata", post(youtube::video_metadata))
        .route("/api/v1/youtube/comments", post(youtube::video_comments))
        .route(
            "/api/v1/youtube/transcript",
            post(youtube::video_transcript),
        )
        .route("/api/v1/reports/full", post(reports::full_report))
        .route("/api/v1/export/{format}", post(export::export_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}
