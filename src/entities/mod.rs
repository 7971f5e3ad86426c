pub mod prelude;

pub mod comments;
pub mod episodes;
pub mod ratings;
pub mod shelf_entries;
pub mod title_genres;
pub mod titles;
pub mod users;
pub mod watch_history;
