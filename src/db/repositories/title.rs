use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::db::now_timestamp;
use crate::domain::TitleId;
use crate::domain::title_info::TitleInfo;
use crate::entities::{episodes, prelude::*, title_genres, titles};
use crate::models::catalogue::CatalogueEntry;
use crate::models::title::Title;

/// Counts returned by a catalogue upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertCounts {
    pub titles: usize,
    pub episodes: usize,
}

pub struct TitleRepository {
    conn: DatabaseConnection,
}

impl TitleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: titles::Model, genres: Vec<String>) -> Title {
        let info = model
            .info
            .as_deref()
            .and_then(|raw| match serde_json::from_str::<TitleInfo>(raw) {
                Ok(info) => Some(info),
                Err(e) => {
                    warn!(title_id = model.id, error = %e, "Ignoring malformed title info");
                    None
                }
            })
            .unwrap_or_default();

        Title {
            id: TitleId::new(model.id),
            name: model.name,
            synopsis: model.synopsis,
            genres,
            thumbnail_ref: model.thumbnail_ref,
            folder_ref: model.folder_ref,
            status: model.status,
            kind: model.kind,
            release_date: model.release_date,
            catalogue_score: model.catalogue_score,
            info,
            created_at: model.created_at,
        }
    }

    async fn genres_for(&self, ids: &[i32]) -> Result<HashMap<i32, Vec<String>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = TitleGenres::find()
            .filter(title_genres::Column::TitleId.is_in(ids.iter().copied()))
            .order_by_asc(title_genres::Column::Genre)
            .all(&self.conn)
            .await
            .context("Failed to load title genres")?;

        let mut map: HashMap<i32, Vec<String>> = HashMap::new();
        for row in rows {
            map.entry(row.title_id).or_default().push(row.genre);
        }
        Ok(map)
    }

    async fn hydrate(&self, models: Vec<titles::Model>) -> Result<Vec<Title>> {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut genres = self.genres_for(&ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let g = genres.remove(&m.id).unwrap_or_default();
                Self::map_model(m, g)
            })
            .collect())
    }

    pub async fn get(&self, id: TitleId) -> Result<Option<Title>> {
        let Some(model) = Titles::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query title")?
        else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![model]).await?.pop())
    }

    pub async fn exists(&self, id: TitleId) -> Result<bool> {
        let found = Titles::find_by_id(id.value())
            .select_only()
            .column(titles::Column::Id)
            .into_tuple::<i32>()
            .one(&self.conn)
            .await
            .context("Failed to check title existence")?;

        Ok(found.is_some())
    }

    /// Titles for the given ids, in no particular order. Unknown ids are skipped.
    pub async fn get_many(&self, ids: &[TitleId]) -> Result<Vec<Title>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Titles::find()
            .filter(titles::Column::Id.is_in(ids.iter().map(TitleId::value)))
            .all(&self.conn)
            .await
            .context("Failed to query titles by id")?;

        self.hydrate(models).await
    }

    pub async fn list(&self, genre: Option<&str>) -> Result<Vec<Title>> {
        let mut query = Titles::find();

        if let Some(genre) = genre {
            query = query.filter(
                titles::Column::Id.in_subquery(
                    sea_orm::sea_query::Query::select()
                        .column(title_genres::Column::TitleId)
                        .from(TitleGenres)
                        .and_where(
                            Expr::expr(Func::lower(Expr::col(title_genres::Column::Genre)))
                                .eq(genre.to_lowercase()),
                        )
                        .to_owned(),
                ),
            );
        }

        let models = query
            .order_by_asc(titles::Column::Name)
            .order_by_asc(titles::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list titles")?;

        self.hydrate(models).await
    }

    pub async fn latest(&self, limit: u64) -> Result<Vec<Title>> {
        let models = Titles::find()
            .order_by_desc(titles::Column::CreatedAt)
            .order_by_desc(titles::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list latest titles")?;

        self.hydrate(models).await
    }

    /// Case-insensitive substring match on the title name.
    pub async fn search(&self, query: &str) -> Result<Vec<Title>> {
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));

        let models = Titles::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(titles::Column::Name)))
                    .like(sea_orm::sea_query::LikeExpr::new(pattern).escape('\\')),
            )
            .order_by_asc(titles::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to search titles")?;

        self.hydrate(models).await
    }

    pub async fn genres(&self) -> Result<Vec<String>> {
        let genres = TitleGenres::find()
            .select_only()
            .column(title_genres::Column::Genre)
            .distinct()
            .order_by_asc(title_genres::Column::Genre)
            .into_tuple::<String>()
            .all(&self.conn)
            .await
            .context("Failed to list genres")?;

        Ok(genres)
    }

    /// Other titles sharing at least one of `genres`, lowest id first, at
    /// most `pool` of them. Genres compare case-insensitively, as in `list`.
    pub async fn genre_peers(
        &self,
        title_id: TitleId,
        genres: &[String],
        pool: u64,
    ) -> Result<Vec<TitleId>> {
        if genres.is_empty() || pool == 0 {
            return Ok(Vec::new());
        }

        let ids = TitleGenres::find()
            .select_only()
            .column(title_genres::Column::TitleId)
            .distinct()
            .filter(
                Expr::expr(Func::lower(Expr::col(title_genres::Column::Genre)))
                    .is_in(genres.iter().map(|g| g.to_lowercase())),
            )
            .filter(title_genres::Column::TitleId.ne(title_id.value()))
            .order_by_asc(title_genres::Column::TitleId)
            .limit(pool)
            .into_tuple::<i32>()
            .all(&self.conn)
            .await
            .context("Failed to query genre peers")?;

        Ok(ids.into_iter().map(TitleId::new).collect())
    }

    /// Inserts or updates a title with its genres and episodes in one
    /// transaction. Existing episodes are matched by label and keep their id.
    pub async fn upsert(&self, entry: &CatalogueEntry) -> Result<UpsertCounts> {
        let info = entry
            .info
            .clone()
            .normalized()
            .map_err(|e| anyhow::anyhow!("Title {}: {e}", entry.id))?;
        let info_json = if info.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&info).context("Failed to encode title info")?)
        };

        let now = now_timestamp();
        let txn = self.conn.begin().await?;

        Titles::insert(titles::ActiveModel {
            id: Set(entry.id),
            name: Set(entry.name.trim().to_string()),
            synopsis: Set(entry.synopsis.clone()),
            thumbnail_ref: Set(entry.thumbnail_ref.clone()),
            folder_ref: Set(entry.folder_ref.clone()),
            status: Set(entry.status.clone()),
            kind: Set(entry.kind.clone()),
            release_date: Set(entry.release_date.clone()),
            catalogue_score: Set(entry.catalogue_score),
            info: Set(info_json),
            created_at: Set(now.clone()),
        })
        .on_conflict(
            OnConflict::column(titles::Column::Id)
                .update_columns([
                    titles::Column::Name,
                    titles::Column::Synopsis,
                    titles::Column::ThumbnailRef,
                    titles::Column::FolderRef,
                    titles::Column::Status,
                    titles::Column::Kind,
                    titles::Column::ReleaseDate,
                    titles::Column::CatalogueScore,
                    titles::Column::Info,
                ])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await
        .context("Failed to upsert title")?;

        TitleGenres::delete_many()
            .filter(title_genres::Column::TitleId.eq(entry.id))
            .exec(&txn)
            .await?;

        let genres = entry.normalized_genres();
        if !genres.is_empty() {
            TitleGenres::insert_many(genres.into_iter().map(|genre| title_genres::ActiveModel {
                title_id: Set(entry.id),
                genre: Set(genre),
            }))
            .exec_without_returning(&txn)
            .await
            .context("Failed to store title genres")?;
        }

        for episode in &entry.episodes {
            Episodes::insert(episodes::ActiveModel {
                title_id: Set(entry.id),
                label: Set(episode.label.trim().to_string()),
                media_480p: Set(episode.media_480p.clone()),
                media_720p: Set(episode.media_720p.clone()),
                media_1080p: Set(episode.media_1080p.clone()),
                created_at: Set(now.clone()),
                ..Default::default()
            })
            .on_conflict(
                OnConflict::columns([episodes::Column::TitleId, episodes::Column::Label])
                    .update_columns([
                        episodes::Column::Media480p,
                        episodes::Column::Media720p,
                        episodes::Column::Media1080p,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .context("Failed to upsert episode")?;
        }

        txn.commit().await?;

        debug!(
            title_id = entry.id,
            episodes = entry.episodes.len(),
            "Upserted catalogue title"
        );

        Ok(UpsertCounts {
            titles: 1,
            episodes: entry.episodes.len(),
        })
    }
}

fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
