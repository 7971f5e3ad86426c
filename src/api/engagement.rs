use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::types::double_option;
use super::validation::{validate_episode_id, validate_limit, validate_user_id};
use super::{ApiError, ApiResponse, AppState, LimitQuery};
use crate::models::engagement::{HistoryEntry, WatchReceipt};
use crate::models::user::PublicProfile;
use crate::services::{EngagementError, ProfileUpdate};

impl From<EngagementError> for ApiError {
    fn from(err: EngagementError) -> Self {
        match err {
            // The episode is part of the request body, not the resource path.
            EngagementError::EpisodeNotFound(id) => {
                Self::ValidationError(format!("Episode {id} does not exist"))
            }
            EngagementError::UserNotFound(id) => Self::not_found("User", id),
            EngagementError::Validation(msg) => Self::ValidationError(msg),
            EngagementError::Storage(e) => e.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordWatchRequest {
    pub episode_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    /// `null` or `""` clears the avatar; absent leaves it unchanged.
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_ref: Option<Option<String>>,
}

/// POST /watch-history
pub async fn record_watch(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<RecordWatchRequest>,
) -> Result<Json<ApiResponse<WatchReceipt>>, ApiError> {
    let episode = validate_episode_id(payload.episode_id)?;
    let receipt = state
        .engagement_service()
        .record_watch(user, episode)
        .await?;
    Ok(Json(ApiResponse::success(receipt)))
}

/// GET /users/{id}
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PublicProfile>>, ApiError> {
    let user = validate_user_id(id)?;
    let profile = state.engagement_service().profile(user).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// GET /users/{id}/history?limit=
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>, ApiError> {
    let user = validate_user_id(id)?;
    let limit = validate_limit(query.limit)?;
    let history = state.engagement_service().history(user, limit).await?;
    Ok(Json(ApiResponse::success(history)))
}

/// PUT /me/profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<PublicProfile>>, ApiError> {
    let update = ProfileUpdate {
        display_name: payload.display_name,
        avatar_ref: payload.avatar_ref,
    };
    let profile = state
        .engagement_service()
        .update_profile(user, update)
        .await?;
    Ok(Json(ApiResponse::success(profile)))
}
