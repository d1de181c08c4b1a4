//! `SeaORM` implementation of the `ReactionService` trait.

use async_trait::async_trait;

use crate::db::{ReactionKind, Store};
use crate::services::reaction_service::{ReactionError, ReactionService};

pub struct SeaOrmReactionService {
    store: Store,
}

impl SeaOrmReactionService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn react(
        &self,
        video_id: i32,
        user_id: i32,
        kind: ReactionKind,
    ) -> Result<(), ReactionError> {
        if self.store.get_video(video_id).await?.is_none() {
            return Err(ReactionError::NotFound);
        }

        self.store.react(video_id, user_id, kind).await?;
        Ok(())
    }
}

#[async_trait]
impl ReactionService for SeaOrmReactionService {
    async fn like(&self, video_id: i32, user_id: i32) -> Result<(), ReactionError> {
        self.react(video_id, user_id, ReactionKind::Like).await
    }

    async fn dislike(&self, video_id: i32, user_id: i32) -> Result<(), ReactionError> {
        self.react(video_id, user_id, ReactionKind::Dislike).await
    }

    async fn counts(&self, video_id: i32) -> Result<(u64, u64), ReactionError> {
        Ok(self.store.reaction_counts(video_id).await?)
    }
}
