mod catalog;
mod init;
mod user;

pub use catalog::{cmd_catalog_import, cmd_catalog_list};
pub use init::cmd_init;
pub use user::{cmd_user_create, cmd_user_list};
