use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
    sea_query::OnConflict,
};

use crate::entities::reactions;

/// The two reaction kinds. Stored as text in the single-row-per-pair
/// reactions table, which is what keeps them mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

pub struct ReactionRepository {
    conn: DatabaseConnection,
}

impl ReactionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Upsert the (video, user) row to the given kind. Reacting twice with
    /// the same kind is a no-op repeat; switching kind overwrites the row,
    /// which evicts the user from the opposite set.
    pub async fn react(&self, video_id: i32, user_id: i32, kind: ReactionKind) -> Result<()> {
        let active = reactions::ActiveModel {
            video_id: Set(video_id),
            user_id: Set(user_id),
            kind: Set(kind.as_str().to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        reactions::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([reactions::Column::VideoId, reactions::Column::UserId])
                    .update_columns([reactions::Column::Kind, reactions::Column::CreatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to upsert reaction")?;

        Ok(())
    }

    pub async fn count(&self, video_id: i32, kind: ReactionKind) -> Result<u64> {
        reactions::Entity::find()
            .filter(reactions::Column::VideoId.eq(video_id))
            .filter(reactions::Column::Kind.eq(kind.as_str()))
            .count(&self.conn)
            .await
            .context("Failed to count reactions")
    }

    /// Like and dislike cardinalities for a video.
    pub async fn counts(&self, video_id: i32) -> Result<(u64, u64)> {
        let likes = self.count(video_id, ReactionKind::Like).await?;
        let dislikes = self.count(video_id, ReactionKind::Dislike).await?;
        Ok((likes, dislikes))
    }
}
