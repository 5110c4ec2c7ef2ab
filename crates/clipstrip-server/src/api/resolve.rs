use axum::{extract::State, Extension, Json};
use clipstrip_scraper::TraceLog;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ResolveRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ResolvedItem {
    video_url: String,
    watermark_url: String,
    trace: TraceLog,
}

pub(super) async fn resolve_video(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ResolveRequest>,
) -> Result<Json<ApiResponse<ResolvedItem>>, ApiError> {
    let resolution = state.resolver.resolve(&body.url).await;

    match resolution.outcome {
        Ok(video) => Ok(Json(ApiResponse {
            data: ResolvedItem {
                video_url: video.video_url,
                watermark_url: video.watermark_url,
                trace: resolution.trace,
            },
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(e) => {
            Err(ApiError::new(req_id.0, e.code(), e.to_string()).with_trace(resolution.trace))
        }
    }
}
