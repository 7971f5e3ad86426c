use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::services::MediaError;

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::InvalidReference(reference) => {
                Self::ValidationError(format!("Invalid media reference: {reference}"))
            }
            MediaError::Upstream(msg) => Self::media_error(msg),
        }
    }
}

/// GET /media/{reference}
pub async fn get_media(
    State(state): State<Arc<AppState>>,
    Path(reference): Path<String>,
) -> Result<Response, ApiError> {
    let relay = state.media_relay();
    let payload = relay.fetch(&reference).await?;

    Ok((
        [
            (header::CONTENT_TYPE, payload.content_type),
            (header::CACHE_CONTROL, relay.cache_control()),
        ],
        payload.bytes,
    )
        .into_response())
}
