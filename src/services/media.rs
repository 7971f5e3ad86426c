//! Relay for opaque media references (thumbnails, avatars).
//!
//! References are resolved against `media.source_url_template` and fetched
//! with the shared HTTP client. Only image responses are passed through.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::MediaConfig;

/// Upper bound on relayed payloads.
const MAX_MEDIA_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid media reference: {0}")]
    InvalidReference(String),

    #[error("Upstream media error: {0}")]
    Upstream(String),
}

#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Media references are opaque ids, never URLs or paths.
#[must_use]
pub fn is_valid_reference(reference: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,128}$").expect("Invalid regex"))
        .is_match(reference)
}

pub struct MediaRelay {
    client: reqwest::Client,
    source_url_template: String,
    cache_max_age_secs: u64,
}

impl MediaRelay {
    #[must_use]
    pub fn new(client: reqwest::Client, config: &MediaConfig) -> Self {
        Self {
            client,
            source_url_template: config.source_url_template.clone(),
            cache_max_age_secs: config.cache_max_age_secs,
        }
    }

    #[must_use]
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}, immutable", self.cache_max_age_secs)
    }

    fn source_url(&self, reference: &str) -> String {
        self.source_url_template.replace("{id}", reference)
    }

    pub async fn fetch(&self, reference: &str) -> Result<MediaPayload, MediaError> {
        if !is_valid_reference(reference) {
            return Err(MediaError::InvalidReference(reference.to_string()));
        }

        let url = self.source_url(reference);
        debug!(reference, "Fetching media from upstream");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(reference, error = %e, "Media upstream request failed");
            MediaError::Upstream(format!("request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::Upstream(format!(
                "upstream returned {status} for {reference}"
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_ascii_lowercase())
            .unwrap_or_default();

        if !content_type.starts_with("image/") {
            return Err(MediaError::Upstream(format!(
                "upstream returned non-image content type '{content_type}'"
            )));
        }

        if response
            .content_length()
            .is_some_and(|len| len > MAX_MEDIA_BYTES as u64)
        {
            return Err(MediaError::Upstream("media exceeds size limit".to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MediaError::Upstream(format!("failed to read body: {e}")))?;

        if bytes.len() > MAX_MEDIA_BYTES {
            return Err(MediaError::Upstream("media exceeds size limit".to_string()));
        }

        Ok(MediaPayload {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, extract::Path, http::header, response::IntoResponse, routing::get};

    async fn serve_upstream() -> String {
        async fn image(Path(id): Path<String>) -> impl IntoResponse {
            match id.as_str() {
                "png1" => ([(header::CONTENT_TYPE, "image/png")], vec![0x89, b'P', b'N', b'G'])
                    .into_response(),
                "html" => ([(header::CONTENT_TYPE, "text/html")], "<html/>").into_response(),
                _ => axum::http::StatusCode::NOT_FOUND.into_response(),
            }
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, Router::new().route("/img/{id}", get(image)))
                .await
                .unwrap();
        });
        format!("http://{addr}/img/{{id}}")
    }

    fn relay(template: String) -> MediaRelay {
        MediaRelay::new(
            reqwest::Client::new(),
            &MediaConfig {
                source_url_template: template,
                ..MediaConfig::default()
            },
        )
    }

    #[test]
    fn reference_validation() {
        assert!(is_valid_reference("1AbC_d-9"));
        assert!(!is_valid_reference(""));
        assert!(!is_valid_reference("../etc/passwd"));
        assert!(!is_valid_reference("http://evil"));
        assert!(!is_valid_reference(&"a".repeat(129)));
    }

    #[test]
    fn cache_header_uses_configured_max_age() {
        let relay = relay("http://localhost/{id}".into());
        assert_eq!(relay.cache_control(), "public, max-age=604800, immutable");
    }

    #[tokio::test]
    async fn relays_images() {
        let relay = relay(serve_upstream().await);
        let payload = relay.fetch("png1").await.unwrap();
        assert_eq!(payload.content_type, "image/png");
        assert_eq!(payload.bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn rejects_non_images_and_missing_media() {
        let relay = relay(serve_upstream().await);
        assert!(matches!(
            relay.fetch("html").await,
            Err(MediaError::Upstream(_))
        ));
        assert!(matches!(
            relay.fetch("missing").await,
            Err(MediaError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn rejects_bad_references_without_a_request() {
        let relay = relay("http://127.0.0.1:9/{id}".into());
        assert!(matches!(
            relay.fetch("a/b").await,
            Err(MediaError::InvalidReference(_))
        ));
    }
}
