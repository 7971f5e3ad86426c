//! `SeaORM` implementation of the `RatingService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::rating::{Score, average_score};
use crate::domain::{TitleId, UserId};
use crate::models::engagement::{Rating, TitleRatings};
use crate::services::rating_service::{RatingError, RatingService};

pub const MAX_REVIEW_LEN: usize = 2000;

pub struct SeaOrmRatingService {
    store: Store,
}

impl SeaOrmRatingService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Blank reviews are stored as no review.
pub fn normalize_review(review: Option<String>) -> Result<Option<String>, RatingError> {
    let Some(review) = review else {
        return Ok(None);
    };

    let trimmed = review.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_REVIEW_LEN {
        return Err(RatingError::Validation(format!(
            "Review must be {MAX_REVIEW_LEN} characters or less"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

#[async_trait]
impl RatingService for SeaOrmRatingService {
    async fn submit_rating(
        &self,
        user: UserId,
        title: TitleId,
        score: i64,
        review: Option<String>,
    ) -> Result<Rating, RatingError> {
        let score = Score::try_from(score).map_err(RatingError::Validation)?;
        let review = normalize_review(review)?;

        if !self.store.title_exists(title).await? {
            return Err(RatingError::TitleNotFound(title));
        }

        let rating = self.store.upsert_rating(user, title, score, review).await?;
        info!(user_id = %user, title_id = %title, score = %score, "Stored rating");
        Ok(rating)
    }

    async fn get_ratings(&self, title: TitleId) -> Result<TitleRatings, RatingError> {
        let ratings = self.store.list_ratings(title).await?;
        let scores: Vec<i32> = ratings.iter().map(|r| r.rating.score.value()).collect();

        Ok(TitleRatings {
            title_id: title,
            average_score: average_score(&scores),
            rating_count: ratings.len(),
            ratings,
        })
    }
}
