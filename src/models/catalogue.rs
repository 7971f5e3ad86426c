//! On-disk catalogue format consumed by `animelog catalog import`.
//!
//! ```toml
//! [[titles]]
//! id = 1
//! name = "Frieren"
//! genres = ["Adventure", "Fantasy"]
//!
//! [titles.info]
//! studio = "Madhouse"
//!
//! [[titles.episodes]]
//! label = "1"
//! media_720p = "1AbCdEf"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::title_info::TitleInfo;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogueFile {
    #[serde(default)]
    pub titles: Vec<CatalogueEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueEntry {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub thumbnail_ref: Option<String>,
    #[serde(default)]
    pub folder_ref: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub catalogue_score: Option<f32>,
    #[serde(default)]
    pub info: TitleInfo,
    #[serde(default)]
    pub episodes: Vec<EpisodeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeEntry {
    pub label: String,
    #[serde(default)]
    pub media_480p: Option<String>,
    #[serde(default)]
    pub media_720p: Option<String>,
    #[serde(default)]
    pub media_1080p: Option<String>,
}

impl CatalogueFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalogue file {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: Self = toml::from_str(content).context("Failed to parse catalogue file")?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<()> {
        let mut ids = BTreeSet::new();

        for entry in &self.titles {
            if entry.id <= 0 {
                anyhow::bail!("Title id must be positive, got {}", entry.id);
            }
            if !ids.insert(entry.id) {
                anyhow::bail!("Duplicate title id {}", entry.id);
            }
            if entry.name.trim().is_empty() {
                anyhow::bail!("Title {} has an empty name", entry.id);
            }

            let mut labels = BTreeSet::new();
            for episode in &entry.episodes {
                let label = episode.label.trim();
                if label.is_empty() {
                    anyhow::bail!("Title {} has an episode with an empty label", entry.id);
                }
                if !labels.insert(label) {
                    anyhow::bail!("Title {} lists episode {label} twice", entry.id);
                }
            }
        }

        Ok(())
    }
}

impl CatalogueEntry {
    /// Genres trimmed, de-duplicated and with blanks removed.
    #[must_use]
    pub fn normalized_genres(&self) -> Vec<String> {
        self.genres
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(ToString::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_entry() {
        let file = CatalogueFile::parse(
            r#"
            [[titles]]
            id = 7
            name = "Frieren"
            genres = ["Fantasy", " Adventure ", "Fantasy", ""]
            catalogue_score = 9.1

            [titles.info]
            studio = "Madhouse"
            source = "manga"

            [[titles.episodes]]
            label = "1"
            media_720p = "abc"

            [[titles.episodes]]
            label = "2"
            "#,
        )
        .unwrap();

        let entry = &file.titles[0];
        assert_eq!(entry.id, 7);
        assert_eq!(entry.normalized_genres(), vec!["Adventure", "Fantasy"]);
        assert_eq!(entry.info.studio.as_deref(), Some("Madhouse"));
        assert_eq!(entry.info.extra["source"], "manga");
        assert_eq!(entry.episodes.len(), 2);
        assert_eq!(entry.episodes[0].media_720p.as_deref(), Some("abc"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = CatalogueFile::parse(
            r#"
            [[titles]]
            id = 1
            name = "A"

            [[titles]]
            id = 1
            name = "B"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_duplicate_episode_labels() {
        let result = CatalogueFile::parse(
            r#"
            [[titles]]
            id = 1
            name = "A"

            [[titles.episodes]]
            label = "1"

            [[titles.episodes]]
            label = " 1"
            "#,
        );
        assert!(result.is_err());
    }
}
