//! Domain service for accounts and bearer tokens.
//!
//! Handles registration, login and token rotation. Verification of incoming
//! tokens lives in [`crate::services::identity`].

use serde::Serialize;
use thiserror::Error;

use crate::domain::UserId;
use crate::services::error::{StorageError, storage_error_conversions};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

storage_error_conversions!(AuthError);

/// Returned by register and login: who you are and the token to send back.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user_id: UserId,
    pub username: String,
    pub display_name: String,
    pub token: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and returns its first token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for a malformed username or short
    /// password and [`AuthError::UsernameTaken`] for duplicates.
    async fn register(
        &self,
        username: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthSession, AuthError>;

    /// Verifies credentials and returns the current token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Regenerates the token for a user and returns the new one. The old
    /// token stops working immediately.
    async fn regenerate_token(&self, user: UserId) -> Result<String, AuthError>;
}
