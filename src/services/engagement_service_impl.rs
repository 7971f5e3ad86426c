//! `SeaORM` implementation of the `EngagementService` trait.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::EngagementConfig;
use crate::db::{Store, User};
use crate::domain::{EpisodeId, UserId};
use crate::models::engagement::{HistoryEntry, WatchOutcome, WatchReceipt};
use crate::models::user::{PublicProfile, normalize_display_name};
use crate::services::engagement_service::{EngagementError, EngagementService, ProfileUpdate};
use crate::services::media::is_valid_reference;

pub struct SeaOrmEngagementService {
    store: Store,
    config: EngagementConfig,
}

impl SeaOrmEngagementService {
    #[must_use]
    pub const fn new(store: Store, config: EngagementConfig) -> Self {
        Self { store, config }
    }

    fn to_profile(&self, user: User) -> PublicProfile {
        PublicProfile {
            id: user.id,
            member_number: user.id.value(),
            display_name: user.display_name,
            avatar_ref: user.avatar_ref,
            xp: user.xp,
            level: self.config.level.level_for(user.xp),
            next_level_xp: self.config.level.next_level_at(user.xp),
            joined_at: user.created_at,
        }
    }
}

#[async_trait]
impl EngagementService for SeaOrmEngagementService {
    async fn record_watch(
        &self,
        user: UserId,
        episode: EpisodeId,
    ) -> Result<WatchReceipt, EngagementError> {
        if self.store.get_episode(episode).await?.is_none() {
            return Err(EngagementError::EpisodeNotFound(episode));
        }

        let grant = u64::from(self.config.xp_per_episode);
        let write = self.store.record_watch(user, episode, grant).await?;

        let (outcome, xp_granted) = if write.inserted {
            metrics::counter!("engagement_watch_recorded_total").increment(1);
            metrics::counter!("engagement_xp_granted_total", "source" => "episode")
                .increment(grant);
            info!(user_id = %user, episode_id = %episode, xp = write.xp, "Recorded watch");
            (WatchOutcome::Recorded, grant)
        } else {
            debug!(user_id = %user, episode_id = %episode, "Watch already recorded");
            (WatchOutcome::AlreadyRecorded, 0)
        };

        Ok(WatchReceipt {
            outcome,
            xp_granted,
            xp: write.xp,
            level: self.config.level.level_for(write.xp),
        })
    }

    async fn profile(&self, user: UserId) -> Result<PublicProfile, EngagementError> {
        let user = self
            .store
            .get_user(user)
            .await?
            .ok_or(EngagementError::UserNotFound(user))?;

        Ok(self.to_profile(user))
    }

    async fn history(
        &self,
        user: UserId,
        limit: Option<u64>,
    ) -> Result<Vec<HistoryEntry>, EngagementError> {
        let limit = limit.unwrap_or(self.config.history_limit);
        let rows = self.store.watch_history(user, limit).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let episode_ids: Vec<EpisodeId> = rows.iter().map(|r| r.episode_id).collect();
        let episodes: HashMap<_, _> = self
            .store
            .get_episodes(&episode_ids)
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        let mut title_ids: Vec<_> = episodes.values().map(|e| e.title_id).collect();
        title_ids.sort_unstable();
        title_ids.dedup();
        let titles: HashMap<_, _> = self
            .store
            .get_titles(&title_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t.summary()))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let episode = episodes.get(&row.episode_id)?;
                let title = titles.get(&episode.title_id)?;
                Some(HistoryEntry {
                    episode_id: row.episode_id,
                    episode_label: episode.label.clone(),
                    title: title.clone(),
                    watched_at: row.watched_at,
                })
            })
            .collect())
    }

    async fn update_profile(
        &self,
        user: UserId,
        update: ProfileUpdate,
    ) -> Result<PublicProfile, EngagementError> {
        let display_name = update
            .display_name
            .as_deref()
            .map(normalize_display_name)
            .transpose()
            .map_err(EngagementError::Validation)?;

        let avatar_ref = match update.avatar_ref {
            Some(Some(reference)) => {
                let reference = reference.trim().to_string();
                if reference.is_empty() {
                    Some(None)
                } else if is_valid_reference(&reference) {
                    Some(Some(reference))
                } else {
                    return Err(EngagementError::Validation(
                        "Avatar reference is not a valid media reference".to_string(),
                    ));
                }
            }
            other => other,
        };

        let updated = self
            .store
            .update_user_profile(user, display_name, avatar_ref)
            .await?
            .ok_or(EngagementError::UserNotFound(user))?;

        Ok(self.to_profile(updated))
    }
}
