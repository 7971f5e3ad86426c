use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::db::now_timestamp;
use crate::domain::{EpisodeId, UserId};
use crate::entities::{prelude::*, users, watch_history};

/// What a single `record_watch` call did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchWrite {
    pub inserted: bool,
    /// The user's XP after the call.
    pub xp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRow {
    pub episode_id: EpisodeId,
    pub watched_at: String,
}

pub struct EngagementRepository {
    conn: DatabaseConnection,
}

impl EngagementRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts the watch event and, only if the row is new, adds `xp` to the
    /// user inside the same transaction.
    ///
    /// The insert comes first and is guarded by the (user, episode) primary
    /// key, so concurrent duplicates are arbitrated by the store: exactly one
    /// of them sees an inserted row.
    pub async fn record_watch(
        &self,
        user_id: UserId,
        episode_id: EpisodeId,
        xp: u64,
    ) -> Result<WatchWrite> {
        let txn = self
            .conn
            .begin()
            .await
            .context("Failed to begin watch transaction")?;

        let inserted = WatchHistory::insert(watch_history::ActiveModel {
            user_id: Set(user_id.value()),
            episode_id: Set(episode_id.value()),
            watched_at: Set(now_timestamp()),
        })
        .on_conflict(
            OnConflict::columns([
                watch_history::Column::UserId,
                watch_history::Column::EpisodeId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await
        .context("Failed to insert watch event")?;

        if inserted > 0 {
            grant_xp(&txn, user_id, xp).await?;
        }

        let xp_now = current_xp(&txn, user_id).await?;
        txn.commit()
            .await
            .context("Failed to commit watch transaction")?;

        Ok(WatchWrite {
            inserted: inserted > 0,
            xp: xp_now,
        })
    }

    /// Most recent first.
    pub async fn history(&self, user_id: UserId, limit: u64) -> Result<Vec<WatchRow>> {
        let rows = WatchHistory::find()
            .filter(watch_history::Column::UserId.eq(user_id.value()))
            .order_by_desc(watch_history::Column::WatchedAt)
            .order_by_desc(watch_history::Column::EpisodeId)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query watch history")?;

        Ok(rows
            .into_iter()
            .map(|row| WatchRow {
                episode_id: EpisodeId::new(row.episode_id),
                watched_at: row.watched_at,
            })
            .collect())
    }
}

/// Adds `amount` to the user's XP. Fails if the user does not exist so the
/// surrounding transaction rolls back.
pub async fn grant_xp<C: ConnectionTrait>(conn: &C, user_id: UserId, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let amount = i64::try_from(amount).context("XP grant out of range")?;
    let result = Users::update_many()
        .col_expr(users::Column::Xp, Expr::col(users::Column::Xp).add(amount))
        .col_expr(users::Column::UpdatedAt, Expr::value(now_timestamp()))
        .filter(users::Column::Id.eq(user_id.value()))
        .exec(conn)
        .await
        .context("Failed to grant XP")?;

    if result.rows_affected == 0 {
        anyhow::bail!("User not found: {user_id}");
    }

    Ok(())
}

async fn current_xp<C: ConnectionTrait>(conn: &C, user_id: UserId) -> Result<u64> {
    let xp = Users::find_by_id(user_id.value())
        .select_only()
        .column(users::Column::Xp)
        .into_tuple::<i64>()
        .one(conn)
        .await
        .context("Failed to read user XP")?
        .ok_or_else(|| anyhow::anyhow!("User not found: {user_id}"))?;

    Ok(u64::try_from(xp).unwrap_or(0))
}
