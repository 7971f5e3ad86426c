use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domain::shelf::{Bookmark, ShelfMode, WatchStatus};
use crate::services::{
    AuthService, CatalogueService, CommentService, EngagementService, IdentityGateway,
    MediaRelay, RatingService, RecommendationService, ShelfService,
};
use crate::state::SharedState;

pub mod auth;
mod catalogue;
mod comments;
mod engagement;
mod error;
mod media;
mod observability;
mod ratings;
mod shelf;
mod system;
mod types;
mod validation;

pub use auth::CurrentUser;
pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityGateway {
        &self.shared.identity
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn catalogue_service(&self) -> &Arc<dyn CatalogueService> {
        &self.shared.catalogue_service
    }

    #[must_use]
    pub fn engagement_service(&self) -> &Arc<dyn EngagementService> {
        &self.shared.engagement_service
    }

    #[must_use]
    pub fn rating_service(&self) -> &Arc<dyn RatingService> {
        &self.shared.rating_service
    }

    #[must_use]
    pub fn watchlist_service(&self) -> &Arc<dyn ShelfService<WatchStatus>> {
        &self.shared.watchlist_service
    }

    #[must_use]
    pub fn bookmark_service(&self) -> &Arc<dyn ShelfService<Bookmark>> {
        &self.shared.bookmark_service
    }

    #[must_use]
    pub fn recommendation_service(&self) -> &Arc<dyn RecommendationService> {
        &self.shared.recommendation_service
    }

    #[must_use]
    pub fn comment_service(&self) -> &Arc<dyn CommentService> {
        &self.shared.comment_service
    }

    #[must_use]
    pub fn media_relay(&self) -> &Arc<MediaRelay> {
        &self.shared.media_relay
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (shelf_mode, cors_origins) = {
        let config = state.config().read().await;
        (
            config.engagement.shelf_mode,
            config.server.cors_allowed_origins.clone(),
        )
    };

    let api_router = Router::new()
        .merge(create_public_router(state.clone(), shelf_mode))
        .merge(create_protected_router(state.clone(), shelf_mode))
        .with_state(state.clone());

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_public_router(state: Arc<AppState>, shelf_mode: ShelfMode) -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/titles", get(catalogue::list_titles))
        .route("/titles/latest", get(catalogue::latest_titles))
        .route("/titles/search", get(catalogue::search_titles))
        .route("/genres", get(catalogue::list_genres))
        .route("/titles/{id}", get(catalogue::get_title))
        .route(
            "/titles/{id}/episodes/{episode_id}",
            get(catalogue::watch_context),
        )
        .route(
            "/titles/{id}/recommendations",
            get(catalogue::recommendations),
        )
        .route("/titles/{id}/ratings", get(ratings::get_ratings))
        .route("/titles/{id}/comments", get(comments::list_comments))
        .route("/users/{id}", get(engagement::get_profile))
        .route("/users/{id}/history", get(engagement::get_history));

    let router = match shelf_mode {
        ShelfMode::Status => router.route("/users/{id}/watchlist", get(shelf::list_watchlist)),
        ShelfMode::Bookmark => router.route("/users/{id}/bookmarks", get(shelf::list_bookmarks)),
    };

    // Health, sign-in and media stay reachable whatever the Authorization header holds.
    router
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::optional_auth_middleware,
        ))
        .route("/health", get(system::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/media/{reference}", get(media::get_media))
}

fn create_protected_router(state: Arc<AppState>, shelf_mode: ShelfMode) -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/token/regenerate", post(auth::regenerate_token))
        .route("/titles/{id}/ratings", post(ratings::submit_rating))
        .route("/titles/{id}/comments", post(comments::post_comment))
        .route("/watch-history", post(engagement::record_watch))
        .route("/me/profile", put(engagement::update_profile));

    let router = match shelf_mode {
        ShelfMode::Status => router.route(
            "/watchlist/{title_id}",
            get(shelf::get_status).put(shelf::set_status),
        ),
        ShelfMode::Bookmark => router.route(
            "/bookmarks/{title_id}",
            get(shelf::get_bookmark)
                .put(shelf::add_bookmark)
                .delete(shelf::remove_bookmark),
        ),
    };

    router.route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
