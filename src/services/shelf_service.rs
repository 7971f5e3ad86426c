//! Domain service for watchlists and bookmarks.
//!
//! Generic over the mark so both representations share one implementation.
//! Which one is exposed is decided by `engagement.shelf_mode`.

use thiserror::Error;

use crate::domain::shelf::ShelfMark;
use crate::domain::{TitleId, UserId};
use crate::models::engagement::ShelfEntry;
use crate::services::error::{StorageError, storage_error_conversions};

#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Title not found: {0}")]
    TitleNotFound(TitleId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

storage_error_conversions!(ShelfError);

#[async_trait::async_trait]
pub trait ShelfService<M: ShelfMark>: Send + Sync {
    /// Sets or clears (`None`) the mark. Idempotent; returns the stored mark.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::TitleNotFound`] when setting a mark on an
    /// unknown title. Clearing never checks the title.
    async fn set(
        &self,
        user: UserId,
        title: TitleId,
        mark: Option<M>,
    ) -> Result<Option<M>, ShelfError>;

    /// `None` when there is no entry, or it was written by the other
    /// representation.
    async fn get(&self, user: UserId, title: TitleId) -> Result<Option<M>, ShelfError>;

    /// Newest first, each with the full title. Empty for unknown users.
    async fn list_by_user(&self, user: UserId) -> Result<Vec<ShelfEntry<M>>, ShelfError>;
}
