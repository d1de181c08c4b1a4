use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::entities::follows;

pub struct FollowRepository {
    conn: DatabaseConnection,
}

impl FollowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn find_by_pair(
        &self,
        follower_id: i32,
        followed_id: i32,
    ) -> Result<Option<follows::Model>> {
        follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::FollowedId.eq(followed_id))
            .one(&self.conn)
            .await
            .context("Failed to query follow edge")
    }

    /// Create the edge if absent. Following an already-followed user is a
    /// no-op; the unique pair index backstops concurrent inserts.
    pub async fn follow(&self, follower_id: i32, followed_id: i32) -> Result<()> {
        if self.find_by_pair(follower_id, followed_id).await?.is_some() {
            return Ok(());
        }

        let active = follows::ActiveModel {
            follower_id: Set(follower_id),
            followed_id: Set(followed_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert follow edge")?;

        Ok(())
    }

    /// Remove the edge if present. Unfollowing a non-followed user is a
    /// no-op.
    pub async fn unfollow(&self, follower_id: i32, followed_id: i32) -> Result<()> {
        follows::Entity::delete_many()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::FollowedId.eq(followed_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete follow edge")?;

        Ok(())
    }

    pub async fn is_following(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        Ok(self.find_by_pair(follower_id, followed_id).await?.is_some())
    }

    pub async fn count_followers(&self, user_id: i32) -> Result<u64> {
        follows::Entity::find()
            .filter(follows::Column::FollowedId.eq(user_id))
            .count(&self.conn)
            .await
            .context("Failed to count followers")
    }

    pub async fn count_following(&self, user_id: i32) -> Result<u64> {
        follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(user_id))
            .count(&self.conn)
            .await
            .context("Failed to count following")
    }
}
