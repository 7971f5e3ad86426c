use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::db::now_timestamp;
use crate::domain::{TitleId, UserId};
use crate::entities::{prelude::*, shelf_entries};

/// Raw shelf row; the mark is interpreted by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfRow {
    pub title_id: TitleId,
    pub mark: String,
    pub updated_at: String,
}

pub struct ShelfRepository {
    conn: DatabaseConnection,
}

impl ShelfRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: shelf_entries::Model) -> ShelfRow {
        ShelfRow {
            title_id: TitleId::new(model.title_id),
            mark: model.mark,
            updated_at: model.updated_at,
        }
    }

    /// Inserts or replaces the mark. An unchanged mark leaves the row,
    /// including `updated_at`, untouched.
    pub async fn upsert(&self, user_id: UserId, title_id: TitleId, mark: &str) -> Result<()> {
        let now = now_timestamp();

        ShelfEntries::insert(shelf_entries::ActiveModel {
            user_id: Set(user_id.value()),
            title_id: Set(title_id.value()),
            mark: Set(mark.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        })
        .on_conflict(
            OnConflict::columns([
                shelf_entries::Column::UserId,
                shelf_entries::Column::TitleId,
            ])
            .update_columns([shelf_entries::Column::Mark, shelf_entries::Column::UpdatedAt])
            .action_and_where(
                Expr::col((ShelfEntries, shelf_entries::Column::Mark))
                    .ne(Expr::cust("excluded.mark")),
            )
            .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await
        .context("Failed to upsert shelf entry")?;

        Ok(())
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, user_id: UserId, title_id: TitleId) -> Result<bool> {
        let result = ShelfEntries::delete_by_id((user_id.value(), title_id.value()))
            .exec(&self.conn)
            .await
            .context("Failed to delete shelf entry")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get(&self, user_id: UserId, title_id: TitleId) -> Result<Option<ShelfRow>> {
        let model = ShelfEntries::find_by_id((user_id.value(), title_id.value()))
            .one(&self.conn)
            .await
            .context("Failed to query shelf entry")?;

        Ok(model.map(Self::map_model))
    }

    /// Newest first.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<ShelfRow>> {
        let rows = ShelfEntries::find()
            .filter(shelf_entries::Column::UserId.eq(user_id.value()))
            .order_by_desc(shelf_entries::Column::UpdatedAt)
            .order_by_desc(shelf_entries::Column::TitleId)
            .all(&self.conn)
            .await
            .context("Failed to list shelf entries")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }
}
