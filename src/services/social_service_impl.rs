//! `SeaORM` implementation of the `SocialService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::SocialConfig;
use crate::db::{Store, User};
use crate::services::social_service::{ProfileView, SocialError, SocialService};
use crate::services::video_service::VideoService;

pub struct SeaOrmSocialService {
    store: Store,
    videos: Arc<dyn VideoService>,
    social: SocialConfig,
}

impl SeaOrmSocialService {
    #[must_use]
    pub fn new(store: Store, videos: Arc<dyn VideoService>, social: SocialConfig) -> Self {
        Self {
            store,
            videos,
            social,
        }
    }

    async fn target_by_username(&self, username: &str) -> Result<User, SocialError> {
        self.store
            .get_user_by_username(username)
            .await?
            .ok_or(SocialError::NotFound)
    }
}

#[async_trait]
impl SocialService for SeaOrmSocialService {
    async fn follow(&self, follower_id: i32, target_username: &str) -> Result<(), SocialError> {
        let target = self.target_by_username(target_username).await?;

        if target.id == follower_id && !self.social.allow_self_follow {
            return Err(SocialError::SelfFollow);
        }

        self.store.follow(follower_id, target.id).await?;

        info!(follower_id, followed_id = target.id, "Follow edge ensured");
        Ok(())
    }

    async fn unfollow(&self, follower_id: i32, target_username: &str) -> Result<(), SocialError> {
        let target = self.target_by_username(target_username).await?;

        self.store.unfollow(follower_id, target.id).await?;

        info!(follower_id, followed_id = target.id, "Follow edge removed");
        Ok(())
    }

    async fn is_following(
        &self,
        follower_id: i32,
        followed_id: i32,
    ) -> Result<bool, SocialError> {
        Ok(self.store.is_following(follower_id, followed_id).await?)
    }

    async fn profile(&self, viewer_id: i32, username: &str) -> Result<ProfileView, SocialError> {
        let user = self.target_by_username(username).await?;

        let followers = self.store.count_followers(user.id).await?;
        let following = self.store.count_following(user.id).await?;
        let is_following = self.store.is_following(viewer_id, user.id).await?;

        let videos = self
            .videos
            .list_by_owner(user.id)
            .await
            .map_err(|e| SocialError::Database(e.to_string()))?;

        Ok(ProfileView {
            username: user.username,
            description: user.description,
            profile_image: user.profile_image,
            followers,
            following,
            is_own: user.id == viewer_id,
            is_following,
            videos,
        })
    }
}
