//! Shared helpers for the integration tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use animelog::api::AppState;
use animelog::config::Config;
use animelog::models::catalogue::CatalogueFile;

pub const CATALOGUE: &str = r#"
[[titles]]
id = 1
name = "Frieren: Beyond Journey's End"
genres = ["Adventure", "Fantasy"]
thumbnail_ref = "frieren-thumb"

[titles.info]
studio = "Madhouse"
source = "manga"

[[titles.episodes]]
label = "10"

[[titles.episodes]]
label = "2"

[[titles.episodes]]
label = "1"

[[titles]]
id = 2
name = "Mushishi"
genres = ["Fantasy", "Slice of Life"]

[[titles.episodes]]
label = "1"

[[titles]]
id = 3
name = "Spy x Family"
genres = ["Comedy"]

[[titles]]
id = 4
name = "Made in Abyss"
genres = ["Adventure"]

[[titles]]
id = 5
name = "Odd Taxi"
"#;

/// Cheap Argon2 settings so registration does not dominate test time.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.observability.metrics_enabled = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

pub fn temp_db_config(prefix: &str) -> Config {
    let db_path =
        std::env::temp_dir().join(format!("{prefix}-{}.db", uuid::Uuid::new_v4()));
    let mut config = test_config();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config
}

pub async fn spawn_app_with(config: Config) -> (Router, Arc<AppState>) {
    let state = animelog::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    let file = CatalogueFile::parse(CATALOGUE).expect("Invalid test catalogue");
    state
        .catalogue_service()
        .import(&file)
        .await
        .expect("Failed to import test catalogue");

    (animelog::api::router(state.clone()).await, state)
}

pub async fn spawn_app() -> (Router, Arc<AppState>) {
    spawn_app_with(test_config()).await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Registers a user and returns `(user_id, token)`.
pub async fn register(app: &Router, username: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        json(
            "POST",
            "/api/auth/register",
            None,
            &serde_json::json!({ "username": username, "password": "correct horse battery" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    (
        body["data"]["user_id"].as_i64().unwrap(),
        body["data"]["token"].as_str().unwrap().to_string(),
    )
}

/// Episode ids of a title in natural label order.
pub async fn episode_ids(app: &Router, title_id: i32) -> Vec<i64> {
    let (status, body) = send(app, get(&format!("/api/titles/{title_id}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["episodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect()
}
