use serde::Serialize;

use crate::domain::rating::Score;
use crate::domain::shelf::ShelfMark;
use crate::domain::{EpisodeId, TitleId, UserId};
use crate::models::title::{Title, TitleSummary};
use crate::models::user::PublicUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchOutcome {
    Recorded,
    AlreadyRecorded,
}

/// Result of `record_watch`, carrying the user's standing after the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchReceipt {
    pub outcome: WatchOutcome,
    pub xp_granted: u64,
    pub xp: u64,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub episode_id: EpisodeId,
    pub episode_label: String,
    pub title: TitleSummary,
    pub watched_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub user_id: UserId,
    pub title_id: TitleId,
    pub score: Score,
    pub review: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingWithUser {
    #[serde(flatten)]
    pub rating: Rating,
    pub user: PublicUser,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleRatings {
    pub title_id: TitleId,
    pub average_score: f64,
    pub rating_count: usize,
    /// Newest update first.
    pub ratings: Vec<RatingWithUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfEntry<M: ShelfMark> {
    pub mark: M,
    pub title: Title,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: i32,
    pub title_id: TitleId,
    pub content: String,
    pub created_at: String,
    pub author: PublicUser,
}
