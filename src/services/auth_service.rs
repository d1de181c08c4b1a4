//! Domain service for accounts and credentials.
//!
//! Handles registration, login verification, and profile updates.

use serde::Serialize;
use thiserror::Error;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or email already belongs to another account.
    #[error("Username or email already taken")]
    DuplicateIdentity,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// An uploaded profile image, as received from the multipart form.
#[derive(Debug, Clone)]
pub struct ProfileImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub profile_image: Option<ProfileImageUpload>,
}

/// Identity established by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
}

/// User info DTO for responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub description: String,
    pub profile_image: Option<String>,
    pub created_at: String,
}

/// Domain service trait for accounts.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and auto-follows the bootstrap owner account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DuplicateIdentity`] if the username or email is
    /// already taken; the store is left unchanged in that case.
    async fn register(&self, registration: Registration) -> Result<AuthenticatedUser, AuthError>;

    /// Verifies credentials. The identifier may be a username or an email.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown identifier
    /// or a wrong password, indistinguishably.
    async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError>;

    /// Gets information for a specific user.
    async fn get_user_info(&self, user_id: i32) -> Result<UserInfo, AuthError>;

    /// Updates username and/or description.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DuplicateIdentity`] if the new username collides
    /// with a different existing user.
    async fn update_profile(
        &self,
        user_id: i32,
        new_username: Option<String>,
        new_description: Option<String>,
    ) -> Result<(), AuthError>;
}
