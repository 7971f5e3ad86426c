//! Catalogue command handlers

use std::path::Path;

use crate::config::Config;
use crate::db::Store;
use crate::models::catalogue::CatalogueFile;
use crate::services::{CatalogueService, SeaOrmCatalogueService};

pub async fn cmd_catalog_import(config: &Config, path: &Path) -> anyhow::Result<()> {
    let file = CatalogueFile::load(path)?;
    let store = Store::new(&config.general.database_path).await?;
    let service = SeaOrmCatalogueService::new(store, config.catalogue.clone());

    let summary = service.import(&file).await?;

    println!(
        "Imported {} titles ({} episodes) from {}",
        summary.titles,
        summary.episodes,
        path.display()
    );
    Ok(())
}

pub async fn cmd_catalog_list(config: &Config, genre: Option<&str>) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let titles = store.list_titles(genre).await?;

    if titles.is_empty() {
        println!("Catalogue is empty.");
        println!();
        println!("Import titles with: animelog catalog import <file.toml>");
        return Ok(());
    }

    println!("Titles ({} total)", titles.len());
    println!("{:-<70}", "");

    for title in titles {
        let episodes = store.list_episodes(title.id).await?.len();
        println!("[{}] {} ({} episodes)", title.id, title.name, episodes);
        if !title.genres.is_empty() {
            println!("  Genres: {}", title.genres.join(", "));
        }
    }

    Ok(())
}
