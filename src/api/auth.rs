use axum::{
    Json,
    extract::{Multipart, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::constants::SESSION_USER_KEY;
use crate::services::auth_service::{
    AuthenticatedUser, ProfileImageUpload, Registration, UserInfo,
};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub description: Option<String>,
}

// ============================================================================
// Middleware
// ============================================================================

/// Gate for every mutating route: requests without an authenticated
/// session are rejected before they reach the domain services.
pub async fn auth_middleware(
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(Some(user_id)) = session.get::<i32>(SESSION_USER_KEY).await {
        tracing::Span::current().record("user_id", user_id);
        return Ok(next.run(request).await);
    }

    Ok(ApiError::unauthenticated().into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Create an account from a multipart form: `username`, `email`,
/// `password`, optional `profile_image` file.
pub async fn register(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AuthenticatedUser>>), ApiError> {
    let mut username = String::new();
    let mut email = String::new();
    let mut password = String::new();
    let mut profile_image: Option<ProfileImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "username" => {
                username = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
            }
            "email" => {
                email = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
            }
            "password" => {
                password = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
            }
            "profile_image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
                if !filename.is_empty() && !bytes.is_empty() {
                    profile_image = Some(ProfileImageUpload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let user = state
        .auth()
        .register(Registration {
            username,
            email,
            password,
            profile_image,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// POST /auth/login
/// Authenticate with username or email, establishes the session on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthenticatedUser>>, ApiError> {
    if payload.identifier.is_empty() {
        return Err(ApiError::validation("Identifier is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .auth()
        .login(&payload.identifier, &payload.password)
        .await?;

    if let Err(e) = session.insert(SESSION_USER_KEY, user.id).await {
        return Err(ApiError::internal(format!("Failed to create session: {e}")));
    }

    Ok(Json(ApiResponse::success(user)))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /auth/me
/// Get current user information (requires authentication)
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user_id = session_user_id(&session).await?;

    let user = state.auth().get_user_info(user_id).await?;

    Ok(Json(ApiResponse::success(user)))
}

/// PUT /users/me
/// Update the caller's username and/or description
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user_id = session_user_id(&session).await?;

    state
        .auth()
        .update_profile(user_id, payload.username, payload.description)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Profile updated",
    ))))
}

// ============================================================================
// Helpers
// ============================================================================

/// Get the user id from the session, returns error if not authenticated
pub async fn session_user_id(session: &Session) -> Result<i32, ApiError> {
    session
        .get::<i32>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(ApiError::unauthenticated)
}
