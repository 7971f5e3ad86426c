use axum::http::StatusCode;
use serde_json::json;
use std::collections::HashSet;

use animelog::models::catalogue::CatalogueFile;

mod common;

use common::{episode_ids, get, json, register, send, spawn_app, spawn_app_with, test_config};

#[tokio::test]
async fn test_health() {
    let (app, _) = spawn_app().await;

    let (status, body) = send(&app, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_protected_routes_require_bearer() {
    let (app, _) = spawn_app().await;

    let (status, body) = send(
        &app,
        json("POST", "/api/watch-history", None, &json!({ "episode_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, get("/api/auth/me", Some("not-a-real-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = axum::http::Request::builder()
        .uri("/api/auth/me")
        .header("Authorization", "Basic abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_reads_accept_an_optional_session() {
    let (app, _) = spawn_app().await;
    let (_, token) = register(&app, "alice").await;

    let (status, _) = send(&app, get("/api/titles/1", None)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get("/api/titles/1", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    // A supplied token must still be valid.
    let (status, body) = send(&app, get("/api/titles/1/ratings", Some("stale-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    // Health and sign-in ignore the header.
    let (status, _) = send(&app, get("/api/health", Some("stale-token"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        json(
            "POST",
            "/api/auth/login",
            Some("stale-token"),
            &json!({ "username": "alice", "password": "correct horse battery" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_login_and_token_rotation() {
    let (app, _) = spawn_app().await;

    let (user_id, token) = register(&app, "alice").await;

    let (status, body) = send(&app, get("/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id);
    assert_eq!(body["data"]["xp"], 0);
    assert_eq!(body["data"]["level"], 1);

    let (status, body) = send(
        &app,
        json(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "username": "alice", "password": "correct horse battery" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token"], token.as_str());

    let (status, _) = send(
        &app,
        json(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "username": "alice", "password": "wrong password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        json("POST", "/api/auth/token/regenerate", Some(&token), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let new_token = body["data"]["token"].as_str().unwrap().to_string();
    assert_ne!(new_token, token);

    let (status, _) = send(&app, get("/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, get("/api/auth/me", Some(&new_token))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_bad_input() {
    let (app, _) = spawn_app().await;
    register(&app, "alice").await;

    let (status, _) = send(
        &app,
        json(
            "POST",
            "/api/auth/register",
            None,
            &json!({ "username": "alice", "password": "another password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        json(
            "POST",
            "/api/auth/register",
            None,
            &json!({ "username": "bob", "password": "short" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json(
            "POST",
            "/api/auth/register",
            None,
            &json!({ "username": "no spaces allowed", "password": "long enough pw" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalogue_browsing() {
    let (app, _) = spawn_app().await;

    let (status, body) = send(&app, get("/api/titles", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (_, body) = send(&app, get("/api/titles?genre=fantasy", None)).await;
    let mut ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2]);

    let (status, body) = send(&app, get("/api/titles/search?q=ABYSS", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], 4);

    let (status, _) = send(&app, get("/api/titles/search?q=", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, get("/api/genres", None)).await;
    assert_eq!(
        body["data"],
        json!(["Adventure", "Comedy", "Fantasy", "Slice of Life"])
    );

    let (_, body) = send(&app, get("/api/titles/latest?limit=2", None)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, get("/api/titles/latest?limit=0", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get("/api/titles/1", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["info"]["studio"], "Madhouse");
    assert_eq!(body["data"]["info"]["source"], "manga");
    let labels: Vec<&str> = body["data"]["episodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["1", "2", "10"]);

    let (status, _) = send(&app, get("/api/titles/999", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/titles/0", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_watch_context_navigation() {
    let (app, _) = spawn_app().await;
    let episodes = episode_ids(&app, 1).await;

    let (status, body) = send(
        &app,
        get(&format!("/api/titles/1/episodes/{}", episodes[0]), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["previous"].is_null());
    assert_eq!(body["data"]["next"]["id"], episodes[1]);
    assert_eq!(body["data"]["title"]["id"], 1);

    let (_, body) = send(
        &app,
        get(&format!("/api/titles/1/episodes/{}", episodes[1]), None),
    )
    .await;
    assert_eq!(body["data"]["previous"]["id"], episodes[0]);
    assert_eq!(body["data"]["next"]["id"], episodes[2]);

    let (_, body) = send(
        &app,
        get(&format!("/api/titles/1/episodes/{}", episodes[2]), None),
    )
    .await;
    assert_eq!(body["data"]["previous"]["id"], episodes[1]);
    assert!(body["data"]["next"].is_null());

    // An episode of another title is not found under this one.
    let other = episode_ids(&app, 2).await[0];
    let (status, _) = send(&app, get(&format!("/api/titles/1/episodes/{other}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_end_to_end_engagement() {
    let (app, _) = spawn_app().await;
    let (alice, token) = register(&app, "alice").await;
    let episodes = episode_ids(&app, 1).await;

    // First watch grants XP, the repeat does not.
    let (status, body) = send(
        &app,
        json(
            "POST",
            "/api/watch-history",
            Some(&token),
            &json!({ "episode_id": episodes[0] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["outcome"], "recorded");
    assert_eq!(body["data"]["xp_granted"], 10);
    assert_eq!(body["data"]["xp"], 10);

    let (status, body) = send(
        &app,
        json(
            "POST",
            "/api/watch-history",
            Some(&token),
            &json!({ "episode_id": episodes[0] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["outcome"], "already_recorded");
    assert_eq!(body["data"]["xp_granted"], 0);
    assert_eq!(body["data"]["xp"], 10);

    let (status, _) = send(
        &app,
        json(
            "POST",
            "/api/watch-history",
            Some(&token),
            &json!({ "episode_id": 99_999 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get(&format!("/api/users/{alice}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["xp"], 10);
    assert_eq!(body["data"]["level"], 1);
    assert_eq!(body["data"]["next_level_xp"], 100);

    let (_, body) = send(&app, get(&format!("/api/users/{alice}/history"), None)).await;
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["episode_id"], episodes[0]);
    assert_eq!(history[0]["episode_label"], "1");
    assert_eq!(history[0]["title"]["id"], 1);

    // Commenting grants comment XP.
    let (status, body) = send(
        &app,
        json(
            "POST",
            "/api/titles/1/comments",
            Some(&token),
            &json!({ "content": "  The pacing is perfect.  " }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["content"], "The pacing is perfect.");
    assert_eq!(body["data"]["author"]["id"], alice);

    let (_, body) = send(&app, get("/api/titles/1/comments", None)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, get(&format!("/api/users/{alice}"), None)).await;
    assert_eq!(body["data"]["xp"], 15);

    let (status, _) = send(
        &app,
        json("POST", "/api/titles/1/comments", Some(&token), &json!({ "content": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_user_reads() {
    let (app, _) = spawn_app().await;

    let (status, _) = send(&app, get("/api/users/4242", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get("/api/users/4242/history", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_ratings_overwrite_and_average() {
    let (app, _) = spawn_app().await;
    let (_, alice) = register(&app, "alice").await;
    let (_, bob) = register(&app, "bob").await;

    let (status, body) = send(&app, get("/api/titles/3/ratings", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["average_score"], 0.0);
    assert_eq!(body["data"]["rating_count"], 0);
    assert_eq!(body["data"]["ratings"], json!([]));

    for score in [3, 5] {
        let (status, _) = send(
            &app,
            json(
                "POST",
                "/api/titles/1/ratings",
                Some(&alice),
                &json!({ "score": score, "review": "Great" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, get("/api/titles/1/ratings", None)).await;
    assert_eq!(body["data"]["rating_count"], 1);
    assert_eq!(body["data"]["average_score"], 5.0);

    send(
        &app,
        json("POST", "/api/titles/1/ratings", Some(&bob), &json!({ "score": 4 })),
    )
    .await;

    let (_, body) = send(&app, get("/api/titles/1/ratings", None)).await;
    assert_eq!(body["data"]["rating_count"], 2);
    assert_eq!(body["data"]["average_score"], 4.5);
    assert!(body["data"]["ratings"][0]["user"]["display_name"].is_string());

    for bad in [json!(0), json!(6), json!(4.5)] {
        let (status, _) = send(
            &app,
            json("POST", "/api/titles/1/ratings", Some(&bob), &json!({ "score": bad })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = send(
        &app,
        json("POST", "/api/titles/999/ratings", Some(&bob), &json!({ "score": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Rejected writes leave the aggregate untouched.
    let (_, body) = send(&app, get("/api/titles/1/ratings", None)).await;
    assert_eq!(body["data"]["average_score"], 4.5);
}

#[tokio::test]
async fn test_watchlist_status_mode() {
    let (app, _) = spawn_app().await;
    let (alice_id, alice) = register(&app, "alice").await;

    let (status, body) = send(&app, get("/api/watchlist/1", Some(&alice))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["status"].is_null());

    let (status, body) = send(
        &app,
        json("PUT", "/api/watchlist/1", Some(&alice), &json!({ "status": "Watching" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "watching");

    // Setting again is idempotent; a new value replaces the old one.
    send(
        &app,
        json("PUT", "/api/watchlist/1", Some(&alice), &json!({ "status": "completed" })),
    )
    .await;
    let (_, body) = send(&app, get(&format!("/api/users/{alice_id}/watchlist"), None)).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["mark"], "completed");
    assert_eq!(entries[0]["title"]["id"], 1);

    let (status, _) = send(
        &app,
        json("PUT", "/api/watchlist/1", Some(&alice), &json!({ "status": "binging" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json("PUT", "/api/watchlist/999", Some(&alice), &json!({ "status": "planned" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        json("PUT", "/api/watchlist/1", Some(&alice), &json!({ "status": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["status"].is_null());

    let (_, body) = send(&app, get(&format!("/api/users/{alice_id}/watchlist"), None)).await;
    assert_eq!(body["data"], json!([]));

    // Bookmark routes are not mounted in status mode.
    let (status, _) = send(&app, get("/api/bookmarks/1", Some(&alice))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_repeated_status_leaves_watchlist_unchanged() {
    let (app, _) = spawn_app().await;
    let (alice_id, alice) = register(&app, "alice").await;
    let planned = json!({ "status": "planned" });

    send(&app, json("PUT", "/api/watchlist/1", Some(&alice), &planned)).await;
    send(&app, json("PUT", "/api/watchlist/2", Some(&alice), &planned)).await;
    let (_, before) = send(&app, get(&format!("/api/users/{alice_id}/watchlist"), None)).await;
    assert_eq!(before["data"][0]["title"]["id"], 2);

    let (status, body) =
        send(&app, json("PUT", "/api/watchlist/1", Some(&alice), &planned)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "planned");

    let (_, after) = send(&app, get(&format!("/api/users/{alice_id}/watchlist"), None)).await;
    assert_eq!(before, after);

    // A different mark is a real change and moves the entry to the front.
    send(
        &app,
        json("PUT", "/api/watchlist/1", Some(&alice), &json!({ "status": "watching" })),
    )
    .await;
    let (_, changed) = send(&app, get(&format!("/api/users/{alice_id}/watchlist"), None)).await;
    assert_eq!(changed["data"][0]["title"]["id"], 1);
    assert_eq!(changed["data"][0]["mark"], "watching");
}

#[tokio::test]
async fn test_repeated_bookmark_keeps_its_timestamp() {
    let mut config = test_config();
    config.engagement.shelf_mode = animelog::domain::shelf::ShelfMode::Bookmark;
    let (app, _) = spawn_app_with(config).await;
    let (alice_id, alice) = register(&app, "alice").await;

    send(&app, json("PUT", "/api/bookmarks/1", Some(&alice), &json!({}))).await;
    let (_, before) = send(&app, get(&format!("/api/users/{alice_id}/bookmarks"), None)).await;

    send(&app, json("PUT", "/api/bookmarks/1", Some(&alice), &json!({}))).await;
    let (_, after) = send(&app, get(&format!("/api/users/{alice_id}/bookmarks"), None)).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_bookmark_mode() {
    let mut config = test_config();
    config.engagement.shelf_mode = animelog::domain::shelf::ShelfMode::Bookmark;
    let (app, _) = spawn_app_with(config).await;
    let (alice_id, alice) = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        json("PUT", "/api/bookmarks/2", Some(&alice), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bookmarked"], true);

    let (_, body) = send(&app, get("/api/bookmarks/2", Some(&alice))).await;
    assert_eq!(body["data"]["bookmarked"], true);

    let (_, body) = send(&app, get(&format!("/api/users/{alice_id}/bookmarks"), None)).await;
    assert_eq!(body["data"][0]["title"]["id"], 2);

    let request = axum::http::Request::builder()
        .method("DELETE")
        .uri("/api/bookmarks/2")
        .header("Authorization", format!("Bearer {alice}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bookmarked"], false);

    let (_, body) = send(&app, get(&format!("/api/users/{alice_id}/bookmarks"), None)).await;
    assert_eq!(body["data"], json!([]));

    let (status, _) = send(&app, get("/api/watchlist/2", Some(&alice))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendations() {
    let (app, _) = spawn_app().await;

    for _ in 0..5 {
        let (status, body) = send(&app, get("/api/titles/1/recommendations?limit=2", None)).await;
        assert_eq!(status, StatusCode::OK);
        let picked = body["data"].as_array().unwrap();
        assert_eq!(picked.len(), 2);

        let mut ids: Vec<i64> = picked.iter().map(|t| t["id"].as_i64().unwrap()).collect();
        assert!(!ids.contains(&1));
        for id in &ids {
            assert!([2, 4].contains(id), "title {id} shares no genre with title 1");
        }
        ids.dedup();
        assert_eq!(ids.len(), 2);
    }

    // No genres, no recommendations.
    let (_, body) = send(&app, get("/api/titles/5/recommendations", None)).await;
    assert_eq!(body["data"], json!([]));

    let (status, _) = send(&app, get("/api/titles/999/recommendations", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Titles 100..=115, all sharing the "Mecha" genre.
fn mecha_catalogue() -> String {
    (100..=115)
        .map(|id| format!("[[titles]]\nid = {id}\nname = \"Mecha {id}\"\ngenres = [\"Mecha\"]\n\n"))
        .collect()
}

async fn import(state: &animelog::api::AppState, catalogue: &str) {
    let file = CatalogueFile::parse(catalogue).unwrap();
    state.catalogue_service().import(&file).await.unwrap();
}

#[tokio::test]
async fn test_recommendations_draw_from_capped_pool() {
    let mut config = test_config();
    config.recommendations.default_limit = 3;
    config.recommendations.max_limit = 4;
    let (app, state) = spawn_app_with(config).await;
    import(&state, &mecha_catalogue()).await;

    // Fifteen peers share the genre, but only the ten lowest ids are candidates.
    let pool: HashSet<i64> = (101..=110).collect();
    let mut seen = HashSet::new();
    for _ in 0..20 {
        let (status, body) =
            send(&app, get("/api/titles/100/recommendations?limit=50", None)).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids.len(), 4, "limit above max_limit is clamped");
        let unique: HashSet<i64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(unique.is_subset(&pool), "{ids:?} escaped the candidate pool");
        seen.extend(unique);
    }
    assert!(seen.len() > 4);

    let (_, body) = send(&app, get("/api/titles/100/recommendations", None)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_recommendations_ignore_genre_case() {
    let (app, state) = spawn_app().await;
    import(
        &state,
        r#"
[[titles]]
id = 200
name = "Upper"
genres = ["Mecha"]

[[titles]]
id = 201
name = "Lower"
genres = ["mecha"]
"#,
    )
    .await;

    let (_, listed) = send(&app, get("/api/titles?genre=MECHA", None)).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, get("/api/titles/200/recommendations", None)).await;
    assert_eq!(body["data"][0]["id"], 201);
}

#[tokio::test]
async fn test_profile_update() {
    let (app, _) = spawn_app().await;
    let (alice_id, alice) = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        json(
            "PUT",
            "/api/me/profile",
            Some(&alice),
            &json!({ "display_name": "  Alice  ", "avatar_ref": "avatar_01" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["display_name"], "Alice");
    assert_eq!(body["data"]["avatar_ref"], "avatar_01");

    // Omitted fields are left alone.
    let (_, body) = send(
        &app,
        json("PUT", "/api/me/profile", Some(&alice), &json!({})),
    )
    .await;
    assert_eq!(body["data"]["avatar_ref"], "avatar_01");

    let (status, _) = send(
        &app,
        json(
            "PUT",
            "/api/me/profile",
            Some(&alice),
            &json!({ "avatar_ref": "../../etc/passwd" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(
        &app,
        json("PUT", "/api/me/profile", Some(&alice), &json!({ "avatar_ref": null })),
    )
    .await;
    assert!(body["data"]["avatar_ref"].is_null());

    let (_, body) = send(&app, get(&format!("/api/users/{alice_id}"), None)).await;
    assert_eq!(body["data"]["display_name"], "Alice");
}

#[tokio::test]
async fn test_media_rejects_invalid_reference() {
    let (app, _) = spawn_app().await;

    let (status, body) = send(&app, get("/api/media/not.a.reference", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_metrics_disabled() {
    let (app, _) = spawn_app().await;

    let response = tower::ServiceExt::oneshot(app, get("/metrics", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
