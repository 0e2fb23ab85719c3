//! Integration tests for the admin login gate.

use av_store_core::KeyValueStore;
use av_store_core::store::PASSWORD_HASH_KEY;
use av_store_integration_tests::{DEFAULT_PASSWORD, TestContext};
use axum::http::StatusCode;

#[tokio::test]
async fn test_default_password_is_seeded() {
    let ctx = TestContext::new().await;
    let hash = ctx.storage.get(PASSWORD_HASH_KEY).await.unwrap();
    assert_eq!(
        hash.as_deref(),
        Some("240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9")
    );
}

#[tokio::test]
async fn test_panel_requires_login() {
    let mut ctx = TestContext::new().await;

    let response = ctx.admin_get("/").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));

    let response = ctx.admin_get("/export").await;
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_login_page_renders_empty_form() {
    let mut ctx = TestContext::new().await;

    let response = ctx.admin_get("/login").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("id=\"login-form\""));
    assert!(!response.body.contains("Invalid credentials"));
}

#[tokio::test]
async fn test_default_password_login_shows_empty_panel() {
    let mut ctx = TestContext::new().await;
    ctx.login().await;
    assert!(ctx.has_session());

    let response = ctx.admin_get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("No products yet."));
    assert!(response.body.contains("id=\"product-form\""));
}

#[tokio::test]
async fn test_wrong_password_keeps_username() {
    let mut ctx = TestContext::new().await;

    let response = ctx.login_as("admin", "wrong").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Invalid credentials"));
    assert!(response.body.contains("value=\"admin\""));
    assert!(!ctx.has_session());

    let response = ctx.admin_get("/").await;
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_wrong_username_is_rejected() {
    let mut ctx = TestContext::new().await;

    let response = ctx.login_as("root", DEFAULT_PASSWORD).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = ctx.login_as("Admin", DEFAULT_PASSWORD).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_username_is_trimmed() {
    let mut ctx = TestContext::new().await;

    let response = ctx.login_as("  admin ", DEFAULT_PASSWORD).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_login_page_redirects_when_signed_in() {
    let mut ctx = TestContext::new().await;
    ctx.login().await;

    let response = ctx.admin_get("/login").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_logout_returns_to_login() {
    let mut ctx = TestContext::new().await;
    ctx.login().await;

    let response = ctx.admin_post_form("/logout", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));

    let response = ctx.admin_get("/").await;
    assert_eq!(response.location.as_deref(), Some("/login"));

    let response = ctx.admin_get("/login").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_checks() {
    let mut ctx = TestContext::new().await;

    let response = ctx.admin_get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");

    let response = ctx.admin_get("/health/ready").await;
    assert_eq!(response.status, StatusCode::OK);
}
