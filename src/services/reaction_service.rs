//! Domain service for the per-video reaction ledger.

use thiserror::Error;

/// Errors specific to reaction operations.
#[derive(Debug, Error)]
pub enum ReactionError {
    #[error("Video not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for ReactionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for reactions. A user is in at most one of a
/// video's two sets; reacting moves them, repeating is a no-op.
#[async_trait::async_trait]
pub trait ReactionService: Send + Sync {
    /// Puts the user in the like set, evicting from dislikes if present.
    ///
    /// # Errors
    ///
    /// Returns [`ReactionError::NotFound`] if the video is absent.
    async fn like(&self, video_id: i32, user_id: i32) -> Result<(), ReactionError>;

    /// Symmetric to [`ReactionService::like`].
    async fn dislike(&self, video_id: i32, user_id: i32) -> Result<(), ReactionError>;

    /// (likes, dislikes) cardinalities.
    async fn counts(&self, video_id: i32) -> Result<(u64, u64), ReactionError>;
}
