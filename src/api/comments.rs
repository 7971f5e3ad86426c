use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::validate_title_id;
use super::{ApiError, ApiResponse, AppState};
use crate::models::engagement::Comment;
use crate::services::CommentError;

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::TitleNotFound(id) => {
                Self::ValidationError(format!("Title {id} does not exist"))
            }
            CommentError::Validation(msg) => Self::ValidationError(msg),
            CommentError::Storage(e) => e.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    pub content: String,
}

/// GET /titles/{id}/comments
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<Comment>>>, ApiError> {
    let id = validate_title_id(id)?;
    let comments = state.comment_service().list_comments(id).await?;
    Ok(Json(ApiResponse::success(comments)))
}

/// POST /titles/{id}/comments
pub async fn post_comment(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<PostCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), ApiError> {
    let id = validate_title_id(id)?;
    let comment = state
        .comment_service()
        .post_comment(user, id, &payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}
