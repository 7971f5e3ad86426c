//! `SeaORM` implementation of the `RecommendationService` trait.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::config::RecommendationConfig;
use crate::db::Store;
use crate::domain::TitleId;
use crate::models::title::Title;
use crate::services::recommendation_service::{RecommendationError, RecommendationService};

pub struct SeaOrmRecommendationService {
    store: Store,
    config: RecommendationConfig,
}

impl SeaOrmRecommendationService {
    #[must_use]
    pub const fn new(store: Store, config: RecommendationConfig) -> Self {
        Self { store, config }
    }
}

/// Shuffles the candidate pool and keeps at most `limit` of it.
pub fn sample<T>(mut candidates: Vec<T>, limit: usize) -> Vec<T> {
    candidates.shuffle(&mut rand::rng());
    candidates.truncate(limit);
    candidates
}

#[async_trait]
impl RecommendationService for SeaOrmRecommendationService {
    async fn recommend(
        &self,
        title: TitleId,
        limit: Option<usize>,
    ) -> Result<Vec<Title>, RecommendationError> {
        let target = self
            .store
            .get_title(title)
            .await?
            .ok_or(RecommendationError::TitleNotFound(title))?;

        let limit = limit
            .unwrap_or(self.config.default_limit)
            .min(self.config.max_limit);
        if limit == 0 || target.genres.is_empty() {
            return Ok(Vec::new());
        }

        let pool = self
            .store
            .genre_peers(title, &target.genres, self.config.candidate_pool)
            .await?;
        let chosen = sample(pool, limit);

        // get_titles does not preserve order, so re-apply the sampled order.
        let mut titles = self.store.get_titles(&chosen).await?;
        titles.sort_by_key(|t| chosen.iter().position(|id| *id == t.id));

        debug!(
            title_id = %title,
            returned = titles.len(),
            "Selected recommendations"
        );
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_is_bounded_and_distinct() {
        let pool: Vec<i32> = (1..=10).collect();
        for limit in [0, 1, 6, 10, 24] {
            let picked = sample(pool.clone(), limit);
            assert_eq!(picked.len(), limit.min(pool.len()));
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
            assert!(picked.iter().all(|id| pool.contains(id)));
        }
    }

    #[test]
    fn sample_order_varies() {
        let pool: Vec<i32> = (1..=10).collect();
        let first = sample(pool.clone(), 10);
        let varied = (0..50).any(|_| sample(pool.clone(), 10) != first);
        assert!(varied);
    }
}
