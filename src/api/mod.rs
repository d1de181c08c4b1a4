use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use time;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod error;
mod observability;
mod types;
mod users;
mod videos;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn crate::services::AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn videos(&self) -> &Arc<dyn crate::services::VideoService> {
        &self.shared.video_service
    }

    #[must_use]
    pub fn social(&self) -> &Arc<dyn crate::services::SocialService> {
        &self.shared.social_service
    }

    #[must_use]
    pub fn reactions(&self) -> &Arc<dyn crate::services::ReactionService> {
        &self.shared.reaction_service
    }
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, secure_cookies, session_hours, media_path, profile_images_path, max_upload_mb) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_hours,
            config.storage.media_path.clone(),
            config.storage.profile_images_path.clone(),
            config.storage.max_upload_mb,
        )
    };

    let protected_routes = create_protected_router();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(session_hours)));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/videos", get(videos::list_videos))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .layer(session_layer)
        .layer(DefaultBodyLimit::max(max_upload_mb * 1024 * 1024))
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service("/media", ServeDir::new(media_path))
        .nest_service("/profile-images", ServeDir::new(profile_images_path))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::get_current_user))
        .route("/videos", post(videos::upload_video))
        .route("/videos/{id}", delete(videos::delete_video))
        .route("/videos/{id}/like", post(videos::like_video))
        .route("/videos/{id}/dislike", post(videos::dislike_video))
        .route("/users/me", put(auth::update_profile))
        .route("/users/{username}", get(users::get_profile))
        .route("/users/{username}/follow", post(users::follow_user))
        .route("/users/{username}/unfollow", post(users::unfollow_user))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::auth_middleware))
}
