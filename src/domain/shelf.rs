//! User-scoped marks on catalogue titles.
//!
//! Watchlists and bookmarks are the same relation: at most one entry per
//! (user, title), optionally carrying a value. [`ShelfMark`] abstracts over
//! the value so one store table and one service cover both representations.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;
use std::str::FromStr;

/// Which representation a deployment treats as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShelfMode {
    #[default]
    Status,
    Bookmark,
}

/// A value that can be stored in a shelf entry.
pub trait ShelfMark:
    Copy + Eq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const MODE: ShelfMode;

    fn as_column(&self) -> &'static str;

    /// Returns `None` for values written by the other representation.
    fn from_column(value: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    Watching,
    Completed,
    Planned,
    Dropped,
}

impl WatchStatus {
    pub const ALL: [Self; 4] = [
        Self::Watching,
        Self::Completed,
        Self::Planned,
        Self::Dropped,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::Planned => "planned",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown watch status: {s}"))
    }
}

impl ShelfMark for WatchStatus {
    const MODE: ShelfMode = ShelfMode::Status;

    fn as_column(&self) -> &'static str {
        self.as_str()
    }

    fn from_column(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

/// Presence-only mark: the entry existing means the title is bookmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bookmark;

impl ShelfMark for Bookmark {
    const MODE: ShelfMode = ShelfMode::Bookmark;

    fn as_column(&self) -> &'static str {
        "bookmarked"
    }

    fn from_column(value: &str) -> Option<Self> {
        (value == "bookmarked").then_some(Self)
    }
}
