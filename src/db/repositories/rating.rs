use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::db::now_timestamp;
use crate::db::repositories::user::{public_user, unknown_user};
use crate::domain::rating::Score;
use crate::domain::{TitleId, UserId};
use crate::entities::{prelude::*, ratings, users};
use crate::models::engagement::{Rating, RatingWithUser};

pub struct RatingRepository {
    conn: DatabaseConnection,
}

impl RatingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: ratings::Model) -> Result<Rating> {
        let score = Score::try_from(i64::from(model.score))
            .map_err(|e| anyhow::anyhow!("Stored rating is invalid: {e}"))?;

        Ok(Rating {
            user_id: UserId::new(model.user_id),
            title_id: TitleId::new(model.title_id),
            score,
            review: model.review,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    /// Insert-or-replace on (user, title). `created_at` survives overwrites.
    pub async fn upsert(
        &self,
        user_id: UserId,
        title_id: TitleId,
        score: Score,
        review: Option<String>,
    ) -> Result<Rating> {
        let now = now_timestamp();

        Ratings::insert(ratings::ActiveModel {
            user_id: Set(user_id.value()),
            title_id: Set(title_id.value()),
            score: Set(score.value()),
            review: Set(review),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        })
        .on_conflict(
            OnConflict::columns([ratings::Column::UserId, ratings::Column::TitleId])
                .update_columns([
                    ratings::Column::Score,
                    ratings::Column::Review,
                    ratings::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await
        .context("Failed to upsert rating")?;

        self.get(user_id, title_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Rating vanished after upsert"))
    }

    pub async fn get(&self, user_id: UserId, title_id: TitleId) -> Result<Option<Rating>> {
        Ratings::find_by_id((user_id.value(), title_id.value()))
            .one(&self.conn)
            .await
            .context("Failed to query rating")?
            .map(Self::map_model)
            .transpose()
    }

    /// Newest update first, each joined with the rater's public projection.
    pub async fn list_for_title(&self, title_id: TitleId) -> Result<Vec<RatingWithUser>> {
        let rows = Ratings::find()
            .filter(ratings::Column::TitleId.eq(title_id.value()))
            .order_by_desc(ratings::Column::UpdatedAt)
            .order_by_asc(ratings::Column::UserId)
            .find_also_related(users::Entity)
            .all(&self.conn)
            .await
            .context("Failed to list ratings")?;

        rows.into_iter()
            .map(|(rating, user)| {
                let user = user.map_or_else(|| unknown_user(rating.user_id), public_user);
                Ok(RatingWithUser {
                    rating: Self::map_model(rating)?,
                    user,
                })
            })
            .collect()
    }
}
