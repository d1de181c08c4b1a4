//! Domain service for the follower graph and profile views.

use serde::Serialize;
use thiserror::Error;

use crate::services::video_service::VideoSummary;

/// Errors specific to follow-graph operations.
#[derive(Debug, Error)]
pub enum SocialError {
    #[error("User not found")]
    NotFound,

    /// Self-follow attempted while the policy rejects it.
    #[error("Cannot follow yourself")]
    SelfFollow,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for SocialError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// View-ready projection of a profile page.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub username: String,
    pub description: String,
    pub profile_image: Option<String>,
    pub followers: u64,
    pub following: u64,
    /// Whether the profile belongs to the viewer.
    pub is_own: bool,
    /// Whether the viewer follows this user.
    pub is_following: bool,
    pub videos: Vec<VideoSummary>,
}

/// Domain service trait for the follower graph.
#[async_trait::async_trait]
pub trait SocialService: Send + Sync {
    /// Creates the follow edge. Idempotent: repeating an existing follow is
    /// a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::SelfFollow`] when the target is the follower
    /// and the policy rejects self-follows; [`SocialError::NotFound`] for a
    /// missing target.
    async fn follow(&self, follower_id: i32, target_username: &str) -> Result<(), SocialError>;

    /// Removes the follow edge. Idempotent.
    async fn unfollow(&self, follower_id: i32, target_username: &str) -> Result<(), SocialError>;

    async fn is_following(
        &self,
        follower_id: i32,
        followed_id: i32,
    ) -> Result<bool, SocialError>;

    /// Profile page data for a username, as seen by the viewer.
    async fn profile(&self, viewer_id: i32, username: &str) -> Result<ProfileView, SocialError>;
}
