//! Integration tests for registration, login, and logout.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The web server running (cargo run -p craftloom-web)
//!
//! Run with: cargo test -p craftloom-integration-tests -- --ignored

use reqwest::StatusCode;

use craftloom_integration_tests::{TestContext, location};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_register_logs_user_in() {
    let ctx = TestContext::new();
    let username = ctx.register_user(false).await;

    // The fresh session should show the account links
    let resp = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("Failed to load home page");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read home page");
    assert!(body.contains(&username));
    assert!(body.contains("/auth/logout"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_username_rejected() {
    let ctx = TestContext::new();
    let username = ctx.register_user(false).await;

    let other = TestContext::new();
    let resp = other
        .client
        .post(other.url("/auth/register"))
        .form(&[
            ("username", username.as_str()),
            ("email", "other@example.com"),
            ("password", "integration-pw"),
            ("password_confirm", "integration-pw"),
        ])
        .send()
        .await
        .expect("Failed to post registration");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/auth/register?error=username_taken");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_mismatched_passwords_rejected() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/auth/register"))
        .form(&[
            ("username", "mismatch_user"),
            ("email", "mismatch@example.com"),
            ("password", "integration-pw"),
            ("password_confirm", "something-else"),
        ])
        .send()
        .await
        .expect("Failed to post registration");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/auth/register?error=password_mismatch");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_with_wrong_password_rejected() {
    let ctx = TestContext::new();
    let username = ctx.register_user(false).await;

    let other = TestContext::new();
    let resp = other
        .client
        .post(other.url("/auth/login"))
        .form(&[("username", username.as_str()), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to post login");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/auth/login?error=credentials");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_logout_ends_session() {
    let ctx = TestContext::new();
    ctx.register_user(false).await;

    let resp = ctx
        .client
        .post(ctx.url("/auth/logout"))
        .send()
        .await
        .expect("Failed to post logout");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/");

    // Protected pages now bounce to login
    let resp = ctx
        .client
        .get(ctx.url("/account/orders"))
        .send()
        .await
        .expect("Failed to load orders page");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/auth/login");
}
