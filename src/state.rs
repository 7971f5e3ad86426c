use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::domain::shelf::{Bookmark, WatchStatus};
use crate::services::{
    AuthService, CatalogueService, CommentService, EngagementService, IdentityGateway,
    MediaRelay, RatingService, RecommendationService, SeaOrmAuthService, SeaOrmCatalogueService,
    SeaOrmCommentService, SeaOrmEngagementService, SeaOrmRatingService,
    SeaOrmRecommendationService, SeaOrmShelfService, ShelfService, StoreIdentityProvider,
};

/// Build a shared HTTP client with reasonable defaults.
/// Reused by every service that talks HTTP so connections are pooled.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("animelog/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub identity: IdentityGateway,

    pub auth_service: Arc<dyn AuthService>,

    pub catalogue_service: Arc<dyn CatalogueService>,

    pub engagement_service: Arc<dyn EngagementService>,

    pub rating_service: Arc<dyn RatingService>,

    pub watchlist_service: Arc<dyn ShelfService<WatchStatus>>,

    pub bookmark_service: Arc<dyn ShelfService<Bookmark>>,

    pub recommendation_service: Arc<dyn RecommendationService>,

    pub comment_service: Arc<dyn CommentService>,

    pub media_relay: Arc<MediaRelay>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    /// Wires every service around an already opened store.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.media.request_timeout_seconds)?;

        let identity =
            IdentityGateway::new(Arc::new(StoreIdentityProvider::new(store.clone())));

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let catalogue_service = Arc::new(SeaOrmCatalogueService::new(
            store.clone(),
            config.catalogue.clone(),
        )) as Arc<dyn CatalogueService>;

        let engagement_service = Arc::new(SeaOrmEngagementService::new(
            store.clone(),
            config.engagement.clone(),
        )) as Arc<dyn EngagementService>;

        let rating_service =
            Arc::new(SeaOrmRatingService::new(store.clone())) as Arc<dyn RatingService>;

        let shelf = Arc::new(SeaOrmShelfService::new(store.clone()));
        let watchlist_service = shelf.clone() as Arc<dyn ShelfService<WatchStatus>>;
        let bookmark_service = shelf as Arc<dyn ShelfService<Bookmark>>;

        let recommendation_service = Arc::new(SeaOrmRecommendationService::new(
            store.clone(),
            config.recommendations.clone(),
        )) as Arc<dyn RecommendationService>;

        let comment_service = Arc::new(SeaOrmCommentService::new(
            store.clone(),
            u64::from(config.engagement.xp_per_comment),
        )) as Arc<dyn CommentService>;

        let media_relay = Arc::new(MediaRelay::new(http_client, &config.media));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            identity,
            auth_service,
            catalogue_service,
            engagement_service,
            rating_service,
            watchlist_service,
            bookmark_service,
            recommendation_service,
            comment_service,
            media_relay,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
