//! Integration tests for public catalog pages and listing ownership.
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
async fn test_public_pages_render() {
    let ctx = TestContext::new();

    for path in ["/", "/artworks", "/materials", "/tutorials", "/blog", "/portfolios"] {
        let resp = ctx
            .client
            .get(ctx.url(path))
            .send()
            .await
            .expect("Failed to load page");
        assert_eq!(resp.status(), StatusCode::OK, "unexpected status for {path}");
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_listing_creation_requires_login() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(ctx.url("/artworks/new"))
        .send()
        .await
        .expect("Failed to load new-artwork form");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_artwork_create_and_show() {
    let ctx = TestContext::new();
    ctx.register_user(true).await;

    let resp = ctx
        .client
        .post(ctx.url("/artworks"))
        .multipart(
            reqwest::multipart::Form::new()
                .text("title", "Integration test bowl")
                .text("description", "A bowl created by the integration tests.")
                .text("price", "42.00")
                .text("medium", "stoneware"),
        )
        .send()
        .await
        .expect("Failed to create artwork");

    assert!(resp.status().is_redirection());
    let detail_path = location(&resp);
    assert!(detail_path.starts_with("/artworks/"));

    let resp = ctx
        .client
        .get(ctx.url(&detail_path))
        .send()
        .await
        .expect("Failed to load artwork page");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read artwork page");
    assert!(body.contains("Integration test bowl"));
    // The owner sees edit controls
    assert!(body.contains(&format!("{detail_path}/edit")));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_editing_someone_elses_artwork_forbidden() {
    let owner = TestContext::new();
    owner.register_user(true).await;

    let resp = owner
        .client
        .post(owner.url("/artworks"))
        .multipart(
            reqwest::multipart::Form::new()
                .text("title", "Not yours")
                .text("description", "Owned by somebody else.")
                .text("price", "10.00")
                .text("medium", "wool"),
        )
        .send()
        .await
        .expect("Failed to create artwork");
    let detail_path = location(&resp);

    let stranger = TestContext::new();
    stranger.register_user(true).await;

    let resp = stranger
        .client
        .get(stranger.url(&format!("{detail_path}/edit")))
        .send()
        .await
        .expect("Failed to request edit form");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_draft_blog_hidden_from_others() {
    let author = TestContext::new();
    author.register_user(true).await;

    let resp = author
        .client
        .post(author.url("/blog"))
        .form(&[
            ("title", "Unpublished draft"),
            ("body", "Not ready for the world."),
        ])
        .send()
        .await
        .expect("Failed to create draft");
    assert!(resp.status().is_redirection());
    let detail_path = location(&resp);

    // Author can see it
    let resp = author
        .client
        .get(author.url(&detail_path))
        .send()
        .await
        .expect("Failed to load draft as author");
    assert_eq!(resp.status(), StatusCode::OK);

    // Anonymous readers cannot
    let anon = TestContext::new();
    let resp = anon
        .client
        .get(anon.url(&detail_path))
        .send()
        .await
        .expect("Failed to load draft anonymously");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
