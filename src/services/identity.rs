//! Bearer credential verification.
//!
//! The gateway only *verifies*: it turns an `Authorization` header into a
//! [`UserId`] through an [`IdentityProvider`]. Minting and rotating tokens
//! belongs to the auth service.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::db::Store;
use crate::domain::UserId;
use crate::services::error::StorageError;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// Header missing, not `Bearer <token>`, or the token is empty.
    #[error("Authentication required")]
    Unauthenticated,

    /// The provider does not recognise the token.
    #[error("Invalid credential")]
    InvalidCredential,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Verifies opaque bearer tokens.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Option<UserId>, StorageError>;
}

/// Tokens issued by the auth service and stored on the user row.
pub struct StoreIdentityProvider {
    store: Store,
}

impl StoreIdentityProvider {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IdentityProvider for StoreIdentityProvider {
    async fn verify(&self, token: &str) -> Result<Option<UserId>, StorageError> {
        let user = self.store.verify_api_token(token).await?;
        Ok(user.map(|u| u.id))
    }
}

#[derive(Clone)]
pub struct IdentityGateway {
    provider: Arc<dyn IdentityProvider>,
}

impl IdentityGateway {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Resolves a required credential.
    pub async fn resolve(&self, authorization: Option<&str>) -> Result<UserId, IdentityError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(IdentityError::Unauthenticated)?;

        self.provider
            .verify(token)
            .await?
            .ok_or(IdentityError::InvalidCredential)
    }

    /// Resolves an ambient session: no header means anonymous, a present but
    /// bad header is still an error.
    pub async fn resolve_optional(
        &self,
        authorization: Option<&str>,
    ) -> Result<Option<UserId>, IdentityError> {
        match authorization {
            None => Ok(None),
            Some(_) => self.resolve(authorization).await.map(Some),
        }
    }
}

/// Extracts the token from `Bearer <token>`. The scheme is case-insensitive.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
