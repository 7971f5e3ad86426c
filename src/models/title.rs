use serde::{Deserialize, Serialize};

use crate::domain::title_info::TitleInfo;
use crate::domain::{EpisodeId, TitleId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,
    pub name: String,
    pub synopsis: Option<String>,
    pub genres: Vec<String>,
    pub thumbnail_ref: Option<String>,
    pub folder_ref: Option<String>,
    pub status: Option<String>,
    pub kind: Option<String>,
    pub release_date: Option<String>,
    pub catalogue_score: Option<f32>,
    pub info: TitleInfo,
    pub created_at: String,
}

impl Title {
    #[must_use]
    pub fn summary(&self) -> TitleSummary {
        TitleSummary {
            id: self.id,
            name: self.name.clone(),
            thumbnail_ref: self.thumbnail_ref.clone(),
        }
    }
}

/// Minimal projection used when a title is embedded in another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSummary {
    pub id: TitleId,
    pub name: String,
    pub thumbnail_ref: Option<String>,
}

/// Resolution-specific media references for one episode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeMedia {
    #[serde(rename = "480p", skip_serializing_if = "Option::is_none")]
    pub p480: Option<String>,
    #[serde(rename = "720p", skip_serializing_if = "Option::is_none")]
    pub p720: Option<String>,
    #[serde(rename = "1080p", skip_serializing_if = "Option::is_none")]
    pub p1080: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub title_id: TitleId,
    pub label: String,
    pub media: EpisodeMedia,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleDetail {
    #[serde(flatten)]
    pub title: Title,
    /// Natural label order.
    pub episodes: Vec<Episode>,
}

/// An episode together with its navigation neighbours inside its title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchContext {
    pub title: TitleSummary,
    pub episode: Episode,
    pub previous: Option<Episode>,
    pub next: Option<Episode>,
}
