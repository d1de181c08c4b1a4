use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, MediaStorage, ReactionService, SeaOrmAuthService, SeaOrmReactionService,
    SeaOrmSocialService, SeaOrmVideoService, SocialService, VideoService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub storage: MediaStorage,

    pub auth_service: Arc<dyn AuthService>,

    pub video_service: Arc<dyn VideoService>,

    pub social_service: Arc<dyn SocialService>,

    pub reaction_service: Arc<dyn ReactionService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let storage = MediaStorage::new(&config.storage);

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            storage.clone(),
            config.security.clone(),
            config.social.clone(),
        )) as Arc<dyn AuthService + Send + Sync + 'static>;

        let video_service = Arc::new(SeaOrmVideoService::new(store.clone(), storage.clone()))
            as Arc<dyn VideoService + Send + Sync + 'static>;

        let social_service = Arc::new(SeaOrmSocialService::new(
            store.clone(),
            video_service.clone(),
            config.social.clone(),
        )) as Arc<dyn SocialService + Send + Sync + 'static>;

        let reaction_service = Arc::new(SeaOrmReactionService::new(store.clone()))
            as Arc<dyn ReactionService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            storage,
            auth_service,
            video_service,
            social_service,
            reaction_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
