use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::db::now_timestamp;
use crate::db::repositories::engagement::grant_xp;
use crate::db::repositories::user::{public_user, unknown_user};
use crate::domain::{TitleId, UserId};
use crate::entities::{comments, prelude::*, users};
use crate::models::engagement::Comment;
use crate::models::user::PublicUser;

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: comments::Model, author: PublicUser) -> Comment {
        Comment {
            id: model.id,
            title_id: TitleId::new(model.title_id),
            content: model.content,
            created_at: model.created_at,
            author,
        }
    }

    /// Appends a comment and grants `xp` to its author atomically.
    pub async fn insert(
        &self,
        user_id: UserId,
        title_id: TitleId,
        content: &str,
        xp: u64,
    ) -> Result<Comment> {
        let txn = self.conn.begin().await?;

        let model = comments::ActiveModel {
            user_id: Set(user_id.value()),
            title_id: Set(title_id.value()),
            content: Set(content.to_string()),
            created_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert comment")?;

        grant_xp(&txn, user_id, xp).await?;

        let author = Users::find_by_id(user_id.value())
            .one(&txn)
            .await
            .context("Failed to load comment author")?
            .map_or_else(|| unknown_user(user_id.value()), public_user);

        txn.commit().await?;

        Ok(Self::map_model(model, author))
    }

    /// Newest first.
    pub async fn list_for_title(&self, title_id: TitleId) -> Result<Vec<Comment>> {
        let rows = Comments::find()
            .filter(comments::Column::TitleId.eq(title_id.value()))
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.conn)
            .await
            .context("Failed to list comments")?;

        Ok(rows
            .into_iter()
            .map(|(comment, user)| {
                let author = user.map_or_else(|| unknown_user(comment.user_id), public_user);
                Self::map_model(comment, author)
            })
            .collect())
    }
}
