//! User command handlers

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService};

pub async fn cmd_user_create(
    config: &Config,
    username: &str,
    password: &str,
    display_name: Option<&str>,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let service = SeaOrmAuthService::new(store, config.security.clone());

    let session = service.register(username, password, display_name).await?;

    println!("Created user '{}' (id {})", session.username, session.user_id);
    println!("Bearer token: {}", session.token);
    Ok(())
}

pub async fn cmd_user_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users yet. Create one with: animelog user create <name> --password <pw>");
        return Ok(());
    }

    println!("{:<6} {:<24} {:<24} {:>8}", "ID", "USERNAME", "DISPLAY NAME", "XP");
    for user in users {
        println!(
            "{:<6} {:<24} {:<24} {:>8}",
            user.id.value(),
            user.username,
            user.display_name,
            user.xp
        );
    }
    Ok(())
}
