//! Plan-gated play pages: sign-in redirects, return paths and upgrades.

use axum::http::StatusCode;
use questline_integration_tests::TestApp;

#[tokio::test]
async fn test_open_game_is_public() {
    let mut app = TestApp::new();
    let resp = app.get("/games/word-sprint").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Word Sprint"));
}

#[tokio::test]
async fn test_anonymous_visitor_is_sent_to_sign_in() {
    let mut app = TestApp::new();
    let resp = app.get("/games/planet-hopper").await;

    assert!(resp.status.is_redirection());
    assert_eq!(resp.location(), Some("/auth/login"));

    let login = app.get("/auth/login").await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body.contains("Please sign in to play Planet Hopper."));
    assert!(login.body.contains("toast--error"));
}

#[tokio::test]
async fn test_free_account_game_needs_sign_in() {
    let mut app = TestApp::new();
    let resp = app.get("/games/fraction-frenzy").await;
    assert_eq!(resp.location(), Some("/auth/login"));

    let signed_in = app.sign_in().await;
    assert_eq!(signed_in.location(), Some("/games/fraction-frenzy"));

    let resp = app.get("/games/fraction-frenzy").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_sign_in_returns_to_recorded_path() {
    let mut app = TestApp::new();
    app.get("/games/code-quest").await;

    let resp = app.sign_in().await;
    assert!(resp.status.is_redirection());
    assert_eq!(resp.location(), Some("/games/code-quest"));
}

#[tokio::test]
async fn test_return_path_is_used_once() {
    let mut app = TestApp::new();
    app.get("/games/code-quest").await;
    app.sign_in().await;
    app.post_form("/auth/logout", "").await;

    let resp = app.sign_in().await;
    assert_eq!(resp.location(), Some("/games"));
}

#[tokio::test]
async fn test_free_user_is_sent_to_pricing() {
    let mut app = TestApp::new();
    app.sign_in().await;

    let resp = app.get("/games/planet-hopper").await;
    assert!(resp.status.is_redirection());
    assert_eq!(resp.location(), Some("/pricing?plan=premium"));

    let pricing = app.get("/pricing?plan=premium").await;
    assert_eq!(pricing.status, StatusCode::OK);
    assert!(pricing.body.contains("needs the Premium plan"));
    assert!(pricing.body.contains("toast--info"));
}

#[tokio::test]
async fn test_upgrade_unlocks_game_and_returns_to_it() {
    let mut app = TestApp::new();
    app.sign_in().await;
    app.get("/games/market-mogul").await;

    let resp = app.post_form("/pricing/growth/subscribe", "").await;
    assert!(resp.status.is_redirection());
    assert_eq!(resp.location(), Some("/games/market-mogul"));

    let game = app.get("/games/market-mogul").await;
    assert_eq!(game.status, StatusCode::OK);
    assert!(game.body.contains("now on the Growth plan."));
}

#[tokio::test]
async fn test_lower_plan_still_locked_out_of_higher_tier() {
    let mut app = TestApp::new();
    app.sign_in().await;
    app.post_form("/pricing/premium/subscribe", "").await;

    assert_eq!(app.get("/games/planet-hopper").await.status, StatusCode::OK);

    let resp = app.get("/games/district-challenge").await;
    assert_eq!(resp.location(), Some("/pricing?plan=enterprise"));
}

#[tokio::test]
async fn test_subscribe_requires_sign_in_and_does_not_replay_post() {
    let mut app = TestApp::new();
    let resp = app.post_form("/pricing/scale/subscribe", "").await;
    assert_eq!(resp.location(), Some("/auth/login"));

    let resp = app.sign_in().await;
    assert_eq!(resp.location(), Some("/games"));
}

#[tokio::test]
async fn test_unknown_plan_is_rejected() {
    let mut app = TestApp::new();
    app.sign_in().await;

    let resp = app.post_form("/pricing/platinum/subscribe", "").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_game_is_not_found() {
    let mut app = TestApp::new();
    let resp = app.get("/games/does-not-exist").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
