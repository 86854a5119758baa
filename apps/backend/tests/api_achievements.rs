//! Achievement API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum_test::TestServer;

use common::fixtures;
use common::TestContext;

/// Test the catalog lists for an authenticated user.
#[tokio::test]
#[ignore = "requires database"]
async fn test_catalog_is_listed() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let user = ctx.create_test_user().await;

    let response = server
        .get("/api/achievements")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&user.token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(!body["all_achievements"].as_array().unwrap().is_empty());
    assert_eq!(body["user_achievements"].as_array().unwrap().len(), 0);

    ctx.cleanup_user(user.id).await;
}

/// Test learning the first word earns the first-word achievement.
#[tokio::test]
#[ignore = "requires database"]
async fn test_first_word_achievement() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let user = ctx.create_test_user().await;
    let category = fixtures::unique_category("ach");
    let seeded = ctx.seed_vocabulary(1, "Easy", &category).await;

    let response = server
        .post("/api/learn/word")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&user.token),
        )
        .json(&fixtures::learn_word_request(seeded[0]))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let titles: Vec<&str> = body["new_achievements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"First Word"));

    let listed: serde_json::Value = server
        .get("/api/achievements")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&user.token),
        )
        .await
        .json();
    assert!(!listed["user_achievements"].as_array().unwrap().is_empty());

    ctx.cleanup_user(user.id).await;
    ctx.cleanup_catalog("vocabulary", &seeded).await;
}

/// Test awarding the same achievement twice stores exactly one row.
#[tokio::test]
#[ignore = "requires database"]
async fn test_award_is_idempotent() {
    let ctx = TestContext::new().await;
    let user = ctx.create_test_user().await;

    let achievement = ctx
        .db
        .get_achievements()
        .await
        .unwrap()
        .into_iter()
        .next()
        .expect("catalog should be seeded");

    let first = ctx
        .db
        .award_achievement(user.id, achievement.id)
        .await
        .unwrap();
    let second = ctx
        .db
        .award_achievement(user.id, achievement.id)
        .await
        .unwrap();
    assert!(first);
    assert!(!second);

    let earned = ctx.db.get_user_achievements(user.id).await.unwrap();
    assert_eq!(earned.len(), 1);

    ctx.cleanup_user(user.id).await;
}
