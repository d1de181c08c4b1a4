//! Domain service for the video catalog.

use serde::Serialize;
use thiserror::Error;

/// Errors specific to catalog operations.
#[derive(Debug, Error)]
pub enum VideoError {
    #[error("Video not found")]
    NotFound,

    /// Requester does not own the video.
    #[error("Not the owner of this video")]
    Forbidden,

    /// File extension outside the accepted video set.
    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for VideoError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// An uploaded video, as received from the multipart form.
#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub title: String,
    pub original_filename: String,
    pub bytes: Vec<u8>,
}

/// View-ready projection of a video row.
#[derive(Debug, Clone, Serialize)]
pub struct VideoSummary {
    pub id: i32,
    pub title: String,
    pub filename: String,
    pub uploader: String,
    pub likes: u64,
    pub dislikes: u64,
}

/// Domain service trait for the video catalog.
#[async_trait::async_trait]
pub trait VideoService: Send + Sync {
    /// Stores the file and records the video under the owner.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::UnsupportedFormat`] before anything is written
    /// when the extension is not an accepted video type.
    async fn upload(&self, owner_id: i32, upload: VideoUpload) -> Result<VideoSummary, VideoError>;

    /// Deletes a video. Owner only; the media file removal is best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::Forbidden`] unless the requester owns the
    /// video.
    async fn delete(&self, video_id: i32, requester_id: i32) -> Result<(), VideoError>;

    /// All videos, stable insertion order.
    async fn list_all(&self) -> Result<Vec<VideoSummary>, VideoError>;

    /// Videos owned by one user, stable insertion order.
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<VideoSummary>, VideoError>;
}
