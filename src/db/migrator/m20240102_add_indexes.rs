use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[(&str, &str)] = &[
    (
        "idx_episodes_title_label_unique",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_episodes_title_label_unique ON episodes(title_id, label)",
    ),
    (
        "idx_title_genres_genre",
        "CREATE INDEX IF NOT EXISTS idx_title_genres_genre ON title_genres(genre, title_id)",
    ),
    (
        "idx_titles_created_at",
        "CREATE INDEX IF NOT EXISTS idx_titles_created_at ON titles(created_at)",
    ),
    (
        "idx_watch_history_user_watched_at",
        "CREATE INDEX IF NOT EXISTS idx_watch_history_user_watched_at ON watch_history(user_id, watched_at)",
    ),
    (
        "idx_ratings_title_updated_at",
        "CREATE INDEX IF NOT EXISTS idx_ratings_title_updated_at ON ratings(title_id, updated_at)",
    ),
    (
        "idx_shelf_entries_user_updated_at",
        "CREATE INDEX IF NOT EXISTS idx_shelf_entries_user_updated_at ON shelf_entries(user_id, updated_at)",
    ),
    (
        "idx_comments_title_created_at",
        "CREATE INDEX IF NOT EXISTS idx_comments_title_created_at ON comments(title_id, created_at)",
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (_, create) in INDEXES {
            conn.execute_unprepared(create).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (name, _) in INDEXES {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS {name}"))
                .await?;
        }

        Ok(())
    }
}
