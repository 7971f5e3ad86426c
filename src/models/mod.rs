pub mod catalogue;
pub mod engagement;
pub mod title;
pub mod user;
