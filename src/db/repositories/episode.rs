use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::{EpisodeId, TitleId};
use crate::entities::{episodes, prelude::*};
use crate::models::title::{Episode, EpisodeMedia};

pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: episodes::Model) -> Episode {
        Episode {
            id: EpisodeId::new(model.id),
            title_id: TitleId::new(model.title_id),
            label: model.label,
            media: EpisodeMedia {
                p480: model.media_480p,
                p720: model.media_720p,
                p1080: model.media_1080p,
            },
            created_at: model.created_at,
        }
    }

    pub async fn get(&self, id: EpisodeId) -> Result<Option<Episode>> {
        let model = Episodes::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query episode")?;

        Ok(model.map(Self::map_model))
    }

    /// Episodes of a title in storage order; callers sort by label.
    pub async fn list_for_title(&self, title_id: TitleId) -> Result<Vec<Episode>> {
        let models = Episodes::find()
            .filter(episodes::Column::TitleId.eq(title_id.value()))
            .all(&self.conn)
            .await
            .context("Failed to list episodes for title")?;

        Ok(models.into_iter().map(Self::map_model).collect())
    }

    pub async fn get_many(&self, ids: &[EpisodeId]) -> Result<Vec<Episode>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Episodes::find()
            .filter(episodes::Column::Id.is_in(ids.iter().map(EpisodeId::value)))
            .all(&self.conn)
            .await
            .context("Failed to query episodes by id")?;

        Ok(models.into_iter().map(Self::map_model).collect())
    }
}
