//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::UserId;
use crate::models::user::normalize_display_name;
use crate::services::auth_service::{AuthError, AuthService, AuthSession};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

pub fn validate_username(username: &str) -> Result<(), AuthError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(AuthError::Validation(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AuthError::Validation(
            "Username can only contain letters, numbers, hyphens, and underscores".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        username: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        validate_username(username)?;

        if password.chars().count() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        let display_name = normalize_display_name(display_name.unwrap_or(username))
            .map_err(AuthError::Validation)?;

        let user = self
            .store
            .create_user(username, &display_name, password, &self.security)
            .await?
            .ok_or_else(|| AuthError::UsernameTaken(username.to_string()))?;

        info!(user_id = %user.id, username = %user.username, "Registered user");

        Ok(AuthSession {
            user_id: user.id,
            username: user.username,
            display_name: user.display_name,
            token: user.api_token,
        })
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        let user = self
            .store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthSession {
            user_id: user.id,
            username: user.username,
            display_name: user.display_name,
            token: user.api_token,
        })
    }

    async fn regenerate_token(&self, user: UserId) -> Result<String, AuthError> {
        if self.store.get_user(user).await?.is_none() {
            return Err(AuthError::UserNotFound(user));
        }

        let token = self.store.regenerate_api_token(user).await?;
        info!(user_id = %user, "Regenerated API token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("frieren").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("dash-and_underscore").is_ok());
    }
}
