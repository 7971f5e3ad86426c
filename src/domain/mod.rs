//! Domain types for the catalogue and engagement core.
//!
//! Identifiers follow the newtype pattern so a `TitleId` can never be passed
//! where an `EpisodeId` is expected.

pub mod episode_label;
pub mod level;
pub mod rating;
pub mod shelf;
pub mod title_info;

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

entity_id!(
    /// Catalogue title identifier. Assigned by the catalogue import, not by the store.
    TitleId
);

entity_id!(
    /// Episode identifier, unique across all titles.
    EpisodeId
);

entity_id!(
    /// User identifier issued when an account is registered.
    UserId
);
