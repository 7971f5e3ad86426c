pub use super::comments::Entity as Comments;
pub use super::episodes::Entity as Episodes;
pub use super::ratings::Entity as Ratings;
pub use super::shelf_entries::Entity as ShelfEntries;
pub use super::title_genres::Entity as TitleGenres;
pub use super::titles::Entity as Titles;
pub use super::users::Entity as Users;
pub use super::watch_history::Entity as WatchHistory;
