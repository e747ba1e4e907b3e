use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use vidpulse_nlp::Analysis;
use vidpulse_youtube::VideoMetadata;

use crate::middleware::RequestId;

use super::{
    export::ExportFormat, map_nlp_error, map_youtube_error, resolve_video_id, ApiError,
    ApiResponse, AppState, ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct FullReportRequest {
    pub url: String,
    pub max_comments: Option<usize>,
    /// Optional formats to write to the configured export directory.
    #[serde(default)]
    pub export: Vec<ExportFormat>,
}

#[derive(Debug, Serialize)]
pub(super) struct FullReportData {
    pub metadata: VideoMetadata,
    pub analysis: Analysis,
    pub exports: Vec<String>,
}

/// One-shot endpoint: resolve the URL, fetch metadata + comments +
/// transcript, run the full pipeline, and optionally export the bundle.
pub(super) async fn full_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<FullReportRequest>,
) -> Result<Json<ApiResponse<FullReportData>>, ApiError> {
    let video_id = resolve_video_id(&req_id.0, &request.url)?;
    let max = request.max_comments.unwrap_or(state.max_comments);

    let (metadata, comments, transcript) = tokio::join!(
        state.youtube.get_metadata(&video_id),
        state.youtube.fetch_comments(&video_id, max),
        state.youtube.fetch_transcript(&video_id),
    );
    let metadata = metadata.map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;
    let comments = comments.map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    tracing::info!(
        video_id,
        comments = comments.len(),
        transcript_chars = transcript.len(),
        "running full analysis"
    );

    let analysis = state
        .pipeline
        .run(
            &comments,
            &transcript,
            metadata.like_count,
            metadata.dislike_count,
        )
        .await
        .map_err(|e| map_nlp_error(req_id.0.clone(), &e))?;

    let mut exports = Vec::with_capacity(request.export.len());
    for format in &request.export {
        let path = format
            .write(&analysis, &state.export_dir)
            .map_err(|e| super::export::map_export_error(req_id.0.clone(), &e))?;
        exports.push(path.display().to_string());
    }

    Ok(Json(ApiResponse {
        data: FullReportData {
            metadata,
            analysis,
            exports,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
