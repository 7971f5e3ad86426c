pub mod comment;
pub mod engagement;
pub mod episode;
pub mod rating;
pub mod shelf;
pub mod title;
pub mod user;
