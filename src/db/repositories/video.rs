use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::entities::{users, videos};

pub struct VideoRepository {
    conn: DatabaseConnection,
}

impl VideoRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, owner_id: i32, title: &str, filename: &str) -> Result<videos::Model> {
        let active = videos::ActiveModel {
            owner_id: Set(owner_id),
            title: Set(title.to_string()),
            filename: Set(filename.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert video")?;

        info!(video_id = model.id, owner_id, "Video record created");
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<videos::Model>> {
        videos::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query video by ID")
    }

    /// Delete a video row. Reaction rows go with it via FK cascade.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let video = self.get(id).await?;
        if let Some(v) = video {
            v.delete(&self.conn)
                .await
                .context("Failed to delete video")?;
        }
        Ok(())
    }

    /// All videos with their uploader, stable insertion (id) order.
    pub async fn list_with_uploader(&self) -> Result<Vec<(videos::Model, Option<users::Model>)>> {
        videos::Entity::find()
            .order_by_asc(videos::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.conn)
            .await
            .context("Failed to list videos")
    }

    pub async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<videos::Model>> {
        videos::Entity::find()
            .filter(videos::Column::OwnerId.eq(owner_id))
            .order_by_asc(videos::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list videos by owner")
    }
}
