use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use vidpulse_youtube::VideoMetadata;

use crate::middleware::RequestId;

use super::{map_youtube_error, resolve_video_id, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct VideoRequest {
    pub url: String,
    pub max_comments: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct CommentsData {
    pub video_id: String,
    pub comments: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TranscriptData {
    pub video_id: String,
    pub transcript: String,
}

pub(super) async fn video_metadata(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<VideoRequest>,
) -> Result<Json<ApiResponse<VideoMetadata>>, ApiError> {
    let video_id = resolve_video_id(&req_id.0, &request.url)?;
    let metadata = state
        .youtube
        .get_metadata(&video_id)
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: metadata,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn video_comments(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<VideoRequest>,
) -> Result<Json<ApiResponse<CommentsData>>, ApiError> {
    let video_id = resolve_video_id(&req_id.0, &request.url)?;
    let max = request.max_comments.unwrap_or(state.max_comments);
    let comments = state
        .youtube
        .fetch_comments(&video_id, max)
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: CommentsData { video_id, comments },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Transcript absence is a normal empty-string result, never an error.
pub(super) async fn video_transcript(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<VideoRequest>,
) -> Result<Json<ApiResponse<TranscriptData>>, ApiError> {
    let video_id = resolve_video_id(&req_id.0, &request.url)?;
    let transcript = state.youtube.fetch_transcript(&video_id).await;

    Ok(Json(ApiResponse {
        data: TranscriptData {
            video_id,
            transcript,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::tests::{body_json, offline_app, post_json};

    #[tokio::test]
    async fn metadata_route_resolves_url_and_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "dQw4w9WgXcQ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "snippet": { "title": "Track Day", "description": "GT3 test." },
                    "statistics": { "viewCount": "500", "likeCount": "40" }
                }]
            })))
            .mount(&server)
            .await;

        let app = offline_app(&server.uri(), PathBuf::from("/tmp"));
        let response = app
            .oneshot(post_json(
                "/api/v1/youtube/metadata",
                &json!({ "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["title"].as_str(), Some("Track Day"));
        assert_eq!(body["data"]["view_count"].as_u64(), Some(500));
    }

    #[tokio::test]
    async fn unknown_video_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let app = offline_app(&server.uri(), PathBuf::from("/tmp"));
        let response = app
            .oneshot(post_json(
                "/api/v1/youtube/metadata",
                &json!({ "url": "https://youtu.be/dQw4w9WgXcQ" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"].as_str(), Some("not_found"));
    }

    #[tokio::test]
    async fn upstream_api_error_maps_to_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "API key not valid.", "errors": [{ "reason": "badRequest" }] }
            })))
            .mount(&server)
            .await;

        let app = offline_app(&server.uri(), PathBuf::from("/tmp"));
        let response = app
            .oneshot(post_json(
                "/api/v1/youtube/comments",
                &json!({ "url": "https://youtu.be/dQw4w9WgXcQ" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"].as_str(), Some("upstream_error"));
    }

    #[tokio::test]
    async fn transcript_route_returns_empty_string_when_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timedtext"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let app = offline_app(&server.uri(), PathBuf::from("/tmp"));
        let response = app
            .oneshot(post_json(
                "/api/v1/youtube/transcript",
                &json!({ "url": "https://youtu.be/dQw4w9WgXcQ" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["transcript"].as_str(), Some(""));
    }
}
