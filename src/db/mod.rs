use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::{users, videos};

pub mod migrator;
pub mod repositories;

pub use repositories::reaction::ReactionKind;
pub use repositories::user::{NewUser, User};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Each pooled connection to an in-memory SQLite sees its own
        // database; a single connection keeps state shared.
        let (max_connections, min_connections) = if db_url.contains(":memory:") {
            (1, 1)
        } else {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn video_repo(&self) -> repositories::video::VideoRepository {
        repositories::video::VideoRepository::new(self.conn.clone())
    }

    fn follow_repo(&self) -> repositories::follow::FollowRepository {
        repositories::follow::FollowRepository::new(self.conn.clone())
    }

    fn reaction_repo(&self) -> repositories::reaction::ReactionRepository {
        repositories::reaction::ReactionRepository::new(self.conn.clone())
    }

    // Users

    pub async fn create_user(&self, new: NewUser, security: &SecurityConfig) -> Result<User> {
        self.user_repo().create(new, security).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        self.user_repo().get_by_identifier(identifier).await
    }

    pub async fn verify_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo().verify_credentials(identifier, password).await
    }

    pub async fn update_user_profile(
        &self,
        id: i32,
        new_username: Option<&str>,
        new_description: Option<&str>,
    ) -> Result<()> {
        self.user_repo()
            .update_profile(id, new_username, new_description)
            .await
    }

    // Videos

    pub async fn insert_video(
        &self,
        owner_id: i32,
        title: &str,
        filename: &str,
    ) -> Result<videos::Model> {
        self.video_repo().insert(owner_id, title, filename).await
    }

    pub async fn get_video(&self, id: i32) -> Result<Option<videos::Model>> {
        self.video_repo().get(id).await
    }

    pub async fn delete_video(&self, id: i32) -> Result<()> {
        self.video_repo().delete(id).await
    }

    pub async fn list_videos_with_uploader(
        &self,
    ) -> Result<Vec<(videos::Model, Option<users::Model>)>> {
        self.video_repo().list_with_uploader().await
    }

    pub async fn list_videos_by_owner(&self, owner_id: i32) -> Result<Vec<videos::Model>> {
        self.video_repo().list_by_owner(owner_id).await
    }

    // Follow graph

    pub async fn follow(&self, follower_id: i32, followed_id: i32) -> Result<()> {
        self.follow_repo().follow(follower_id, followed_id).await
    }

    pub async fn unfollow(&self, follower_id: i32, followed_id: i32) -> Result<()> {
        self.follow_repo().unfollow(follower_id, followed_id).await
    }

    pub async fn is_following(&self, follower_id: i32, followed_id: i32) -> Result<bool> {
        self.follow_repo()
            .is_following(follower_id, followed_id)
            .await
    }

    pub async fn count_followers(&self, user_id: i32) -> Result<u64> {
        self.follow_repo().count_followers(user_id).await
    }

    pub async fn count_following(&self, user_id: i32) -> Result<u64> {
        self.follow_repo().count_following(user_id).await
    }

    // Reactions

    pub async fn react(&self, video_id: i32, user_id: i32, kind: ReactionKind) -> Result<()> {
        self.reaction_repo().react(video_id, user_id, kind).await
    }

    pub async fn reaction_counts(&self, video_id: i32) -> Result<(u64, u64)> {
        self.reaction_repo().counts(video_id).await
    }
}
