//! `SeaORM` implementation of the `VideoService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::constants::UNTITLED;
use crate::db::Store;
use crate::entities::videos;
use crate::services::storage::{self, MediaStorage};
use crate::services::video_service::{VideoError, VideoService, VideoSummary, VideoUpload};

pub struct SeaOrmVideoService {
    store: Store,
    storage: MediaStorage,
}

impl SeaOrmVideoService {
    #[must_use]
    pub const fn new(store: Store, storage: MediaStorage) -> Self {
        Self { store, storage }
    }

    async fn summarize(
        &self,
        video: videos::Model,
        uploader: String,
    ) -> Result<VideoSummary, VideoError> {
        let (likes, dislikes) = self.store.reaction_counts(video.id).await?;

        Ok(VideoSummary {
            id: video.id,
            title: video.title,
            filename: video.filename,
            uploader,
            likes,
            dislikes,
        })
    }
}

#[async_trait]
impl VideoService for SeaOrmVideoService {
    async fn upload(&self, owner_id: i32, upload: VideoUpload) -> Result<VideoSummary, VideoError> {
        if upload.original_filename.is_empty() || upload.bytes.is_empty() {
            return Err(VideoError::Validation("No video file supplied".to_string()));
        }

        // Reject before touching the filesystem so no orphan file or
        // record exists for a disallowed upload.
        if !storage::is_allowed_video(&upload.original_filename) {
            return Err(VideoError::UnsupportedFormat);
        }

        let title = if upload.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            upload.title.trim().to_string()
        };

        let stored = self
            .storage
            .save_video(&upload.original_filename, &upload.bytes)
            .await
            .map_err(|e| VideoError::Storage(e.to_string()))?;

        let video = self.store.insert_video(owner_id, &title, &stored).await?;

        let uploader = self
            .store
            .get_user(owner_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_default();

        self.summarize(video, uploader).await
    }

    async fn delete(&self, video_id: i32, requester_id: i32) -> Result<(), VideoError> {
        let video = self
            .store
            .get_video(video_id)
            .await?
            .ok_or(VideoError::NotFound)?;

        if video.owner_id != requester_id {
            return Err(VideoError::Forbidden);
        }

        self.store.delete_video(video_id).await?;

        // Best-effort: the record is gone even if the file lingers.
        self.storage.remove_video(&video.filename).await;

        info!(video_id, owner_id = requester_id, "Video deleted");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<VideoSummary>, VideoError> {
        let rows = self.store.list_videos_with_uploader().await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for (video, uploader) in rows {
            let uploader = uploader.map(|u| u.username).unwrap_or_default();
            summaries.push(self.summarize(video, uploader).await?);
        }

        Ok(summaries)
    }

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<VideoSummary>, VideoError> {
        let uploader = self
            .store
            .get_user(owner_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_default();

        let rows = self.store.list_videos_by_owner(owner_id).await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for video in rows {
            summaries.push(self.summarize(video, uploader.clone()).await?);
        }

        Ok(summaries)
    }
}
