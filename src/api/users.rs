use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::social_service::ProfileView;

/// GET /users/{username}
/// Profile page data as seen by the caller (requires authentication)
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<ProfileView>>, ApiError> {
    let viewer_id = session_user_id(&session).await?;

    let profile = state.social().profile(viewer_id, &username).await?;

    Ok(Json(ApiResponse::success(profile)))
}

/// POST /users/{username}/follow
pub async fn follow_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user_id = session_user_id(&session).await?;

    state.social().follow(user_id, &username).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Following {username}"
    )))))
}

/// POST /users/{username}/unfollow
pub async fn unfollow_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user_id = session_user_id(&session).await?;

    state.social().unfollow(user_id, &username).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Unfollowed {username}"
    )))))
}
