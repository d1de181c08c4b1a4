use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::video_service::{VideoSummary, VideoUpload};

/// GET /videos
/// List all videos with uploader and reaction counts (public)
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<VideoSummary>>>, ApiError> {
    let videos = state.videos().list_all().await?;
    Ok(Json(ApiResponse::success(videos)))
}

/// POST /videos
/// Upload a video from a multipart form: `title`, `video` file
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<VideoSummary>>), ApiError> {
    let user_id = session_user_id(&session).await?;

    let mut title = String::new();
    let mut original_filename = String::new();
    let mut bytes = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
            }
            "video" => {
                original_filename = field.file_name().unwrap_or("").to_string();
                bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?
                    .to_vec();
            }
            _ => {}
        }
    }

    let summary = state
        .videos()
        .upload(
            user_id,
            VideoUpload {
                title,
                original_filename,
                bytes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(summary))))
}

/// DELETE /videos/{id}
/// Remove a video (owner only)
pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(video_id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user_id = session_user_id(&session).await?;

    state.videos().delete(video_id, user_id).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Video deleted",
    ))))
}

/// POST /videos/{id}/like
pub async fn like_video(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(video_id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user_id = session_user_id(&session).await?;

    state.reactions().like(video_id, user_id).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new("Liked"))))
}

/// POST /videos/{id}/dislike
pub async fn dislike_video(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(video_id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user_id = session_user_id(&session).await?;

    state.reactions().dislike(video_id, user_id).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new("Disliked"))))
}
