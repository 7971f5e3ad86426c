use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_episode_id, validate_limit, validate_title_id};
use super::{ApiError, ApiResponse, AppState, LimitQuery};
use crate::models::title::{Title, TitleDetail, WatchContext};
use crate::services::{CatalogueError, RecommendationError};

impl From<CatalogueError> for ApiError {
    fn from(err: CatalogueError) -> Self {
        match err {
            CatalogueError::TitleNotFound(id) => Self::not_found("Title", id),
            CatalogueError::EpisodeNotFound { title, episode } => {
                Self::NotFound(format!("Episode {episode} not found in title {title}"))
            }
            CatalogueError::Validation(msg) => Self::ValidationError(msg),
            CatalogueError::Storage(e) => e.into(),
        }
    }
}

impl From<RecommendationError> for ApiError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::TitleNotFound(id) => Self::not_found("Title", id),
            RecommendationError::Storage(e) => e.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /titles?genre=
pub async fn list_titles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Title>>>, ApiError> {
    let genre = query.genre.as_deref().map(str::trim).filter(|g| !g.is_empty());
    let titles = state.catalogue_service().list(genre).await?;
    Ok(Json(ApiResponse::success(titles)))
}

/// GET /titles/latest?limit=
pub async fn latest_titles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<Title>>>, ApiError> {
    let limit = validate_limit(query.limit)?;
    let titles = state.catalogue_service().latest(limit).await?;
    Ok(Json(ApiResponse::success(titles)))
}

/// GET /titles/search?q=
pub async fn search_titles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Title>>>, ApiError> {
    let titles = state.catalogue_service().search(&query.q).await?;
    Ok(Json(ApiResponse::success(titles)))
}

/// GET /genres
pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let genres = state.catalogue_service().genres().await?;
    Ok(Json(ApiResponse::success(genres)))
}

/// GET /titles/{id}
pub async fn get_title(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TitleDetail>>, ApiError> {
    let id = validate_title_id(id)?;
    let detail = state.catalogue_service().detail(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// GET /titles/{id}/episodes/{episode_id}
pub async fn watch_context(
    State(state): State<Arc<AppState>>,
    Path((id, episode_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<WatchContext>>, ApiError> {
    let id = validate_title_id(id)?;
    let episode_id = validate_episode_id(episode_id)?;
    let context = state
        .catalogue_service()
        .watch_context(id, episode_id)
        .await?;
    Ok(Json(ApiResponse::success(context)))
}

/// GET /titles/{id}/recommendations?limit=
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<Title>>>, ApiError> {
    let id = validate_title_id(id)?;
    let limit = validate_limit(query.limit)?
        .map(|l| usize::try_from(l).unwrap_or(usize::MAX));
    let titles = state.recommendation_service().recommend(id, limit).await?;
    Ok(Json(ApiResponse::success(titles)))
}
