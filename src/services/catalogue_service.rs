//! Domain service for browsing and maintaining the catalogue.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{EpisodeId, TitleId};
use crate::models::catalogue::CatalogueFile;
use crate::models::title::{Title, TitleDetail, WatchContext};
use crate::services::error::{StorageError, storage_error_conversions};

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Title not found: {0}")]
    TitleNotFound(TitleId),

    #[error("Episode {episode} not found in title {title}")]
    EpisodeNotFound { title: TitleId, episode: EpisodeId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

storage_error_conversions!(CatalogueError);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub titles: usize,
    pub episodes: usize,
}

#[async_trait::async_trait]
pub trait CatalogueService: Send + Sync {
    /// All titles by name, optionally only those tagged with `genre`.
    async fn list(&self, genre: Option<&str>) -> Result<Vec<Title>, CatalogueError>;

    /// Most recently added first. `None` uses the configured default.
    async fn latest(&self, limit: Option<u64>) -> Result<Vec<Title>, CatalogueError>;

    /// Case-insensitive substring search on the name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Validation`] for an empty query.
    async fn search(&self, query: &str) -> Result<Vec<Title>, CatalogueError>;

    async fn genres(&self) -> Result<Vec<String>, CatalogueError>;

    /// The title with its episodes in natural label order.
    async fn detail(&self, title: TitleId) -> Result<TitleDetail, CatalogueError>;

    /// An episode of `title` with its previous and next episodes.
    async fn watch_context(
        &self,
        title: TitleId,
        episode: EpisodeId,
    ) -> Result<WatchContext, CatalogueError>;

    /// Upserts every title in the file. Titles are written one transaction
    /// each; the first failure stops the import.
    async fn import(&self, file: &CatalogueFile) -> Result<ImportSummary, CatalogueError>;
}
