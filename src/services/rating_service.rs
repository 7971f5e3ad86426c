//! Domain service for per-user title ratings.

use thiserror::Error;

use crate::domain::{TitleId, UserId};
use crate::models::engagement::{Rating, TitleRatings};
use crate::services::error::{StorageError, storage_error_conversions};

#[derive(Debug, Error)]
pub enum RatingError {
    #[error("Title not found: {0}")]
    TitleNotFound(TitleId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

storage_error_conversions!(RatingError);

#[async_trait::async_trait]
pub trait RatingService: Send + Sync {
    /// Inserts or replaces the user's rating of a title.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::Validation`] for a score outside 1..=5 or an
    /// oversized review, and [`RatingError::TitleNotFound`] for unknown
    /// titles. Nothing is written in either case.
    async fn submit_rating(
        &self,
        user: UserId,
        title: TitleId,
        score: i64,
        review: Option<String>,
    ) -> Result<Rating, RatingError>;

    /// All ratings of a title with their mean. A title nobody rated (or
    /// that does not exist) reports an empty list and the 0.0 sentinel.
    async fn get_ratings(&self, title: TitleId) -> Result<TitleRatings, RatingError>;
}
