//! Domain service for the watch ledger, XP and public profiles.

use thiserror::Error;

use crate::domain::{EpisodeId, UserId};
use crate::models::engagement::{HistoryEntry, WatchReceipt};
use crate::models::user::PublicProfile;
use crate::services::error::{StorageError, storage_error_conversions};

#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("Episode not found: {0}")]
    EpisodeNotFound(EpisodeId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

storage_error_conversions!(EngagementError);

/// Fields of a profile update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    /// `Some(None)` clears the avatar.
    pub avatar_ref: Option<Option<String>>,
}

#[async_trait::async_trait]
pub trait EngagementService: Send + Sync {
    /// Records that `user` watched `episode`.
    ///
    /// XP is granted only the first time; repeated or concurrent calls for
    /// the same pair return [`crate::models::engagement::WatchOutcome::AlreadyRecorded`].
    ///
    /// # Errors
    ///
    /// Returns [`EngagementError::EpisodeNotFound`] if the episode does not
    /// exist and [`EngagementError::Storage`] if the store fails, in which
    /// case nothing was written.
    async fn record_watch(
        &self,
        user: UserId,
        episode: EpisodeId,
    ) -> Result<WatchReceipt, EngagementError>;

    async fn profile(&self, user: UserId) -> Result<PublicProfile, EngagementError>;

    /// Most recent watches first. `limit` defaults to the configured history
    /// limit. Unknown users have an empty history.
    async fn history(
        &self,
        user: UserId,
        limit: Option<u64>,
    ) -> Result<Vec<HistoryEntry>, EngagementError>;

    async fn update_profile(
        &self,
        user: UserId,
        update: ProfileUpdate,
    ) -> Result<PublicProfile, EngagementError>;
}
