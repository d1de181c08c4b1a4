//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::{SecurityConfig, SocialConfig};
use crate::db::{NewUser, Store};
use crate::services::auth_service::{
    AuthError, AuthService, AuthenticatedUser, Registration, UserInfo,
};
use crate::services::storage::{self, MediaStorage};

pub struct SeaOrmAuthService {
    store: Store,
    storage: MediaStorage,
    security: SecurityConfig,
    social: SocialConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(
        store: Store,
        storage: MediaStorage,
        security: SecurityConfig,
        social: SocialConfig,
    ) -> Self {
        Self {
            store,
            storage,
            security,
            social,
        }
    }

    /// Connect a fresh account to the seeded owner account. A missing
    /// bootstrap account downgrades to a warning rather than failing the
    /// registration that triggered it.
    async fn auto_follow_bootstrap(&self, new_user_id: i32) -> Result<(), AuthError> {
        let Some(owner) = self
            .store
            .get_user_by_username(&self.social.bootstrap_username)
            .await?
        else {
            warn!(
                bootstrap = %self.social.bootstrap_username,
                "Bootstrap account missing, skipping auto-follow"
            );
            return Ok(());
        };

        if owner.id != new_user_id {
            self.store.follow(new_user_id, owner.id).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<AuthenticatedUser, AuthError> {
        let username = registration.username.trim().to_string();
        let email = registration.email.trim().to_lowercase();

        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        if email.is_empty() {
            return Err(AuthError::Validation("Email is required".to_string()));
        }
        if registration.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        if self.store.get_user_by_username(&username).await?.is_some() {
            return Err(AuthError::DuplicateIdentity);
        }
        if self.store.get_user_by_identifier(&email).await?.is_some() {
            return Err(AuthError::DuplicateIdentity);
        }

        // A disallowed image type leaves the picture unset; it does not
        // fail the registration.
        let profile_image = match registration.profile_image {
            Some(upload) if storage::is_allowed_image(&upload.filename) => Some(
                self.storage
                    .save_profile_image(&upload.filename, &upload.bytes)
                    .await
                    .map_err(|e| AuthError::Internal(e.to_string()))?,
            ),
            _ => None,
        };

        let user = self
            .store
            .create_user(
                NewUser {
                    username,
                    email,
                    password: registration.password,
                    profile_image,
                },
                &self.security,
            )
            .await?;

        self.auto_follow_bootstrap(user.id).await?;

        info!(user_id = user.id, username = %user.username, "User registered");

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
        })
    }

    async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let user = self
            .store
            .verify_credentials(identifier.trim(), password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
        })
    }

    async fn get_user_info(&self, user_id: i32) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            description: user.description,
            profile_image: user.profile_image,
            created_at: user.created_at,
        })
    }

    async fn update_profile(
        &self,
        user_id: i32,
        new_username: Option<String>,
        new_description: Option<String>,
    ) -> Result<(), AuthError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let new_username = new_username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        if let Some(username) = &new_username
            && *username != user.username
            && self.store.get_user_by_username(username).await?.is_some()
        {
            return Err(AuthError::DuplicateIdentity);
        }

        self.store
            .update_user_profile(
                user_id,
                new_username.as_deref(),
                new_description.as_deref(),
            )
            .await?;

        Ok(())
    }
}
