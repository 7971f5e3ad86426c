//! Watchlist (status mode) and bookmark (bookmark mode) endpoints. Only the
//! routes for the configured `engagement.shelf_mode` are mounted.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{validate_title_id, validate_user_id};
use super::{ApiError, ApiResponse, AppState};
use crate::domain::{TitleId, UserId};
use crate::domain::shelf::{Bookmark, WatchStatus};
use crate::models::engagement::ShelfEntry;
use crate::services::ShelfError;

impl From<ShelfError> for ApiError {
    fn from(err: ShelfError) -> Self {
        match err {
            ShelfError::TitleNotFound(id) => {
                Self::ValidationError(format!("Title {id} does not exist"))
            }
            ShelfError::Storage(e) => e.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// `null` removes the title from the watchlist.
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub title_id: TitleId,
    pub status: Option<WatchStatus>,
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub title_id: TitleId,
    pub bookmarked: bool,
}

/// GET /users/{id}/watchlist
pub async fn list_watchlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ShelfEntry<WatchStatus>>>>, ApiError> {
    let user = validate_user_id(id)?;
    let entries = state.watchlist_service().list_by_user(user).await?;
    Ok(Json(ApiResponse::success(entries)))
}

/// GET /watchlist/{title_id}
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(title_id): Path<i32>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let title_id = validate_title_id(title_id)?;
    let status = state.watchlist_service().get(user, title_id).await?;
    Ok(Json(ApiResponse::success(StatusResponse { title_id, status })))
}

/// PUT /watchlist/{title_id}
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(title_id): Path<i32>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let title_id = validate_title_id(title_id)?;
    let status = payload
        .status
        .as_deref()
        .map(str::parse::<WatchStatus>)
        .transpose()
        .map_err(ApiError::ValidationError)?;

    let status = state
        .watchlist_service()
        .set(user, title_id, status)
        .await?;
    Ok(Json(ApiResponse::success(StatusResponse { title_id, status })))
}

/// GET /users/{id}/bookmarks
pub async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ShelfEntry<Bookmark>>>>, ApiError> {
    let user = validate_user_id(id)?;
    let entries = state.bookmark_service().list_by_user(user).await?;
    Ok(Json(ApiResponse::success(entries)))
}

/// GET /bookmarks/{title_id}
pub async fn get_bookmark(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(title_id): Path<i32>,
) -> Result<Json<ApiResponse<BookmarkResponse>>, ApiError> {
    let title_id = validate_title_id(title_id)?;
    let bookmarked = state
        .bookmark_service()
        .get(user, title_id)
        .await?
        .is_some();
    Ok(Json(ApiResponse::success(BookmarkResponse {
        title_id,
        bookmarked,
    })))
}

/// PUT /bookmarks/{title_id}
pub async fn add_bookmark(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(title_id): Path<i32>,
) -> Result<Json<ApiResponse<BookmarkResponse>>, ApiError> {
    set_bookmark(&state, user, title_id, Some(Bookmark)).await
}

/// DELETE /bookmarks/{title_id}
pub async fn remove_bookmark(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(title_id): Path<i32>,
) -> Result<Json<ApiResponse<BookmarkResponse>>, ApiError> {
    set_bookmark(&state, user, title_id, None).await
}

async fn set_bookmark(
    state: &AppState,
    user: UserId,
    title_id: i32,
    mark: Option<Bookmark>,
) -> Result<Json<ApiResponse<BookmarkResponse>>, ApiError> {
    let title_id = validate_title_id(title_id)?;
    let bookmarked = state
        .bookmark_service()
        .set(user, title_id, mark)
        .await?
        .is_some();
    Ok(Json(ApiResponse::success(BookmarkResponse {
        title_id,
        bookmarked,
    })))
}
