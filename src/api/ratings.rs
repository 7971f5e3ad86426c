use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::validate_title_id;
use super::{ApiError, ApiResponse, AppState};
use crate::models::engagement::{Rating, TitleRatings};
use crate::services::RatingError;

impl From<RatingError> for ApiError {
    fn from(err: RatingError) -> Self {
        match err {
            RatingError::TitleNotFound(id) => {
                Self::ValidationError(format!("Title {id} does not exist"))
            }
            RatingError::Validation(msg) => Self::ValidationError(msg),
            RatingError::Storage(e) => e.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    /// Kept as a raw number so `4.5` is reported as a validation error
    /// instead of a body rejection.
    pub score: serde_json::Number,
    pub review: Option<String>,
}

/// GET /titles/{id}/ratings
pub async fn get_ratings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TitleRatings>>, ApiError> {
    let id = validate_title_id(id)?;
    let ratings = state.rating_service().get_ratings(id).await?;
    Ok(Json(ApiResponse::success(ratings)))
}

/// POST /titles/{id}/ratings
pub async fn submit_rating(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<SubmitRatingRequest>,
) -> Result<Json<ApiResponse<Rating>>, ApiError> {
    let id = validate_title_id(id)?;
    let score = payload
        .score
        .as_i64()
        .ok_or_else(|| ApiError::validation("Score must be an integer between 1 and 5"))?;

    let rating = state
        .rating_service()
        .submit_rating(user, id, score, payload.review)
        .await?;
    Ok(Json(ApiResponse::success(rating)))
}
