//! `SeaORM` implementation of the `CatalogueService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::CatalogueConfig;
use crate::db::Store;
use crate::domain::episode_label::{neighbours, sort_by_label};
use crate::domain::{EpisodeId, TitleId};
use crate::models::catalogue::CatalogueFile;
use crate::models::title::{Episode, Title, TitleDetail, WatchContext};
use crate::services::catalogue_service::{CatalogueError, CatalogueService, ImportSummary};

const MAX_QUERY_LEN: usize = 200;

pub struct SeaOrmCatalogueService {
    store: Store,
    config: CatalogueConfig,
}

impl SeaOrmCatalogueService {
    #[must_use]
    pub const fn new(store: Store, config: CatalogueConfig) -> Self {
        Self { store, config }
    }

    async fn ordered_episodes(&self, title: TitleId) -> Result<Vec<Episode>, CatalogueError> {
        let mut episodes = self.store.list_episodes(title).await?;
        sort_by_label(&mut episodes, |e| e.label.as_str());
        Ok(episodes)
    }

    async fn require_title(&self, title: TitleId) -> Result<Title, CatalogueError> {
        self.store
            .get_title(title)
            .await?
            .ok_or(CatalogueError::TitleNotFound(title))
    }
}

#[async_trait]
impl CatalogueService for SeaOrmCatalogueService {
    async fn list(&self, genre: Option<&str>) -> Result<Vec<Title>, CatalogueError> {
        let genre = genre.map(str::trim).filter(|g| !g.is_empty());
        Ok(self.store.list_titles(genre).await?)
    }

    async fn latest(&self, limit: Option<u64>) -> Result<Vec<Title>, CatalogueError> {
        let limit = limit.unwrap_or(self.config.latest_limit);
        Ok(self.store.latest_titles(limit).await?)
    }

    async fn search(&self, query: &str) -> Result<Vec<Title>, CatalogueError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogueError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }
        if query.chars().count() > MAX_QUERY_LEN {
            return Err(CatalogueError::Validation(format!(
                "Search query must be {MAX_QUERY_LEN} characters or less"
            )));
        }
        Ok(self.store.search_titles(query).await?)
    }

    async fn genres(&self) -> Result<Vec<String>, CatalogueError> {
        Ok(self.store.list_genres().await?)
    }

    async fn detail(&self, title: TitleId) -> Result<TitleDetail, CatalogueError> {
        let found = self.require_title(title).await?;
        let episodes = self.ordered_episodes(title).await?;
        Ok(TitleDetail {
            title: found,
            episodes,
        })
    }

    async fn watch_context(
        &self,
        title: TitleId,
        episode: EpisodeId,
    ) -> Result<WatchContext, CatalogueError> {
        let found = self.require_title(title).await?;
        let episodes = self.ordered_episodes(title).await?;

        let around = neighbours(&episodes, |e| e.id == episode)
            .ok_or(CatalogueError::EpisodeNotFound { title, episode })?;

        Ok(WatchContext {
            title: found.summary(),
            episode: around.current.clone(),
            previous: around.previous.cloned(),
            next: around.next.cloned(),
        })
    }

    async fn import(&self, file: &CatalogueFile) -> Result<ImportSummary, CatalogueError> {
        let mut summary = ImportSummary::default();

        for entry in &file.titles {
            let counts = self.store.upsert_title(entry).await?;
            summary.titles += counts.titles;
            summary.episodes += counts.episodes;
        }

        info!(
            titles = summary.titles,
            episodes = summary.episodes,
            "Catalogue import finished"
        );
        Ok(summary)
    }
}
