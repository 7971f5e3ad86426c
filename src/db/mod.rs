use anyhow::Result;
use chrono::SecondsFormat;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::rating::Score;
use crate::domain::{EpisodeId, TitleId, UserId};
use crate::models::catalogue::CatalogueEntry;
use crate::models::engagement::{Comment, Rating, RatingWithUser};
use crate::models::title::{Episode, Title};

pub mod migrator;
pub mod repositories;

pub use repositories::engagement::{WatchRow, WatchWrite};
pub use repositories::shelf::ShelfRow;
pub use repositories::title::UpsertCounts;
pub use repositories::user::User;

/// RFC 3339 UTC timestamp with microsecond precision. Fixed width, so
/// lexical order in the store equals chronological order.
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn title_repo(&self) -> repositories::title::TitleRepository {
        repositories::title::TitleRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn engagement_repo(&self) -> repositories::engagement::EngagementRepository {
        repositories::engagement::EngagementRepository::new(self.conn.clone())
    }

    fn rating_repo(&self) -> repositories::rating::RatingRepository {
        repositories::rating::RatingRepository::new(self.conn.clone())
    }

    fn shelf_repo(&self) -> repositories::shelf::ShelfRepository {
        repositories::shelf::ShelfRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    // Catalogue

    pub async fn upsert_title(&self, entry: &CatalogueEntry) -> Result<UpsertCounts> {
        self.title_repo().upsert(entry).await
    }

    pub async fn get_title(&self, id: TitleId) -> Result<Option<Title>> {
        self.title_repo().get(id).await
    }

    pub async fn title_exists(&self, id: TitleId) -> Result<bool> {
        self.title_repo().exists(id).await
    }

    pub async fn get_titles(&self, ids: &[TitleId]) -> Result<Vec<Title>> {
        self.title_repo().get_many(ids).await
    }

    pub async fn list_titles(&self, genre: Option<&str>) -> Result<Vec<Title>> {
        self.title_repo().list(genre).await
    }

    pub async fn latest_titles(&self, limit: u64) -> Result<Vec<Title>> {
        self.title_repo().latest(limit).await
    }

    pub async fn search_titles(&self, query: &str) -> Result<Vec<Title>> {
        self.title_repo().search(query).await
    }

    pub async fn list_genres(&self) -> Result<Vec<String>> {
        self.title_repo().genres().await
    }

    pub async fn genre_peers(
        &self,
        title_id: TitleId,
        genres: &[String],
        pool: u64,
    ) -> Result<Vec<TitleId>> {
        self.title_repo().genre_peers(title_id, genres, pool).await
    }

    pub async fn get_episode(&self, id: EpisodeId) -> Result<Option<Episode>> {
        self.episode_repo().get(id).await
    }

    pub async fn get_episodes(&self, ids: &[EpisodeId]) -> Result<Vec<Episode>> {
        self.episode_repo().get_many(ids).await
    }

    pub async fn list_episodes(&self, title_id: TitleId) -> Result<Vec<Episode>> {
        self.episode_repo().list_for_title(title_id).await
    }

    // Users

    pub async fn create_user(
        &self,
        username: &str,
        display_name: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<User>> {
        self.user_repo()
            .create(username, display_name, password, security)
            .await
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn verify_api_token(&self, token: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_token(token).await
    }

    pub async fn regenerate_api_token(&self, id: UserId) -> Result<String> {
        self.user_repo().regenerate_api_token(id).await
    }

    pub async fn update_user_profile(
        &self,
        id: UserId,
        display_name: Option<String>,
        avatar_ref: Option<Option<String>>,
    ) -> Result<Option<User>> {
        self.user_repo()
            .update_profile(id, display_name, avatar_ref)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    // Engagement

    pub async fn record_watch(
        &self,
        user_id: UserId,
        episode_id: EpisodeId,
        xp: u64,
    ) -> Result<WatchWrite> {
        self.engagement_repo()
            .record_watch(user_id, episode_id, xp)
            .await
    }

    pub async fn watch_history(&self, user_id: UserId, limit: u64) -> Result<Vec<WatchRow>> {
        self.engagement_repo().history(user_id, limit).await
    }

    pub async fn upsert_rating(
        &self,
        user_id: UserId,
        title_id: TitleId,
        score: Score,
        review: Option<String>,
    ) -> Result<Rating> {
        self.rating_repo()
            .upsert(user_id, title_id, score, review)
            .await
    }

    pub async fn list_ratings(&self, title_id: TitleId) -> Result<Vec<RatingWithUser>> {
        self.rating_repo().list_for_title(title_id).await
    }

    pub async fn upsert_shelf_entry(
        &self,
        user_id: UserId,
        title_id: TitleId,
        mark: &str,
    ) -> Result<()> {
        self.shelf_repo().upsert(user_id, title_id, mark).await
    }

    pub async fn delete_shelf_entry(&self, user_id: UserId, title_id: TitleId) -> Result<bool> {
        self.shelf_repo().delete(user_id, title_id).await
    }

    pub async fn get_shelf_entry(
        &self,
        user_id: UserId,
        title_id: TitleId,
    ) -> Result<Option<ShelfRow>> {
        self.shelf_repo().get(user_id, title_id).await
    }

    pub async fn list_shelf_entries(&self, user_id: UserId) -> Result<Vec<ShelfRow>> {
        self.shelf_repo().list_by_user(user_id).await
    }

    pub async fn add_comment(
        &self,
        user_id: UserId,
        title_id: TitleId,
        content: &str,
        xp: u64,
    ) -> Result<Comment> {
        self.comment_repo()
            .insert(user_id, title_id, content, xp)
            .await
    }

    pub async fn list_comments(&self, title_id: TitleId) -> Result<Vec<Comment>> {
        self.comment_repo().list_for_title(title_id).await
    }
}
