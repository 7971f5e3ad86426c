//! `SeaORM` implementation of the `ShelfService` trait.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::db::Store;
use crate::domain::shelf::ShelfMark;
use crate::domain::{TitleId, UserId};
use crate::models::engagement::ShelfEntry;
use crate::services::shelf_service::{ShelfError, ShelfService};

pub struct SeaOrmShelfService {
    store: Store,
}

impl SeaOrmShelfService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<M: ShelfMark> ShelfService<M> for SeaOrmShelfService {
    async fn set(
        &self,
        user: UserId,
        title: TitleId,
        mark: Option<M>,
    ) -> Result<Option<M>, ShelfError> {
        let Some(mark) = mark else {
            let removed = self.store.delete_shelf_entry(user, title).await?;
            debug!(user_id = %user, title_id = %title, removed, "Cleared shelf entry");
            return Ok(None);
        };

        if !self.store.title_exists(title).await? {
            return Err(ShelfError::TitleNotFound(title));
        }

        self.store
            .upsert_shelf_entry(user, title, mark.as_column())
            .await?;
        info!(
            user_id = %user,
            title_id = %title,
            mark = mark.as_column(),
            "Updated shelf entry"
        );
        Ok(Some(mark))
    }

    async fn get(&self, user: UserId, title: TitleId) -> Result<Option<M>, ShelfError> {
        let row = self.store.get_shelf_entry(user, title).await?;
        Ok(row.and_then(|r| M::from_column(&r.mark)))
    }

    async fn list_by_user(&self, user: UserId) -> Result<Vec<ShelfEntry<M>>, ShelfError> {
        let rows: Vec<_> = self
            .store
            .list_shelf_entries(user)
            .await?
            .into_iter()
            .filter_map(|row| M::from_column(&row.mark).map(|mark| (row, mark)))
            .collect();

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<TitleId> = rows.iter().map(|(row, _)| row.title_id).collect();
        let mut titles: HashMap<_, _> = self
            .store
            .get_titles(&ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(row, mark)| {
                titles.remove(&row.title_id).map(|title| ShelfEntry {
                    mark,
                    title,
                    updated_at: row.updated_at,
                })
            })
            .collect())
    }
}
