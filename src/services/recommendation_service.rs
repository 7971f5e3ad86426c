//! Domain service for "more like this" suggestions.

use thiserror::Error;

use crate::domain::TitleId;
use crate::models::title::Title;
use crate::services::error::{StorageError, storage_error_conversions};

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Title not found: {0}")]
    TitleNotFound(TitleId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

storage_error_conversions!(RecommendationError);

#[async_trait::async_trait]
pub trait RecommendationService: Send + Sync {
    /// Up to `limit` other titles sharing at least one genre with `title`,
    /// in random order. `None` uses the configured default.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendationError::TitleNotFound`] for unknown titles.
    async fn recommend(
        &self,
        title: TitleId,
        limit: Option<usize>,
    ) -> Result<Vec<Title>, RecommendationError>;
}
