use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::domain::UserId;
use crate::models::user::PublicProfile;
use crate::services::{AuthError, AuthSession};

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthError::UsernameTaken(name) => {
                Self::Conflict(format!("Username '{name}' is already taken"))
            }
            AuthError::UserNotFound(id) => Self::not_found("User", id),
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::Storage(e) => e.into(),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// The caller resolved from the bearer token, set by [`auth_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

// ============================================================================
// Middleware
// ============================================================================

/// Requires `Authorization: Bearer <token>` and makes the caller available to
/// handlers as an `Extension<CurrentUser>`.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let user = state.identity().resolve(header.as_deref()).await?;

    tracing::Span::current().record("user_id", user.value());
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Ambient session for public reads. Anonymous requests pass through; a
/// supplied token must still be valid. A resolved caller is attributed on
/// the request span and exposed as an `Extension<CurrentUser>`.
pub async fn optional_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    if let Some(user) = state.identity().resolve_optional(header.as_deref()).await? {
        tracing::Span::current().record("user_id", user.value());
        request.extensions_mut().insert(CurrentUser(user));
    }

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthSession>>), ApiError> {
    let session = state
        .auth_service()
        .register(
            &payload.username,
            &payload.password,
            payload.display_name.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(session))))
}

/// POST /auth/login
/// Authenticate with username and password, returns the bearer token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthSession>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let session = state
        .auth_service()
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(session)))
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<PublicProfile>>, ApiError> {
    let profile = state.engagement_service().profile(user).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// POST /auth/token/regenerate
/// The previous token stops working immediately.
pub async fn regenerate_token(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let token = state.auth_service().regenerate_token(user).await?;
    tracing::info!(user_id = %user, "Bearer token regenerated");
    Ok(Json(ApiResponse::success(TokenResponse { token })))
}
