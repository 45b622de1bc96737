//! Integration tests for the cart and the checkout wizard.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The web server running (cargo run -p craftloom-web)
//!
//! Run with: cargo test -p craftloom-integration-tests -- --ignored

use reqwest::StatusCode;

use craftloom_integration_tests::{TestContext, location};

/// Create an artwork as a throwaway artist and return its numeric ID.
async fn listed_artwork_id(price: &str) -> String {
    let artist = TestContext::new();
    artist.register_user(true).await;

    let resp = artist
        .client
        .post(artist.url("/artworks"))
        .multipart(
            reqwest::multipart::Form::new()
                .text("title", "Checkout flow piece")
                .text("description", "Sold by the integration tests.")
                .text("price", price.to_string())
                .text("medium", "stoneware"),
        )
        .send()
        .await
        .expect("Failed to create artwork");
    assert!(resp.status().is_redirection());

    location(&resp)
        .rsplit('/')
        .next()
        .expect("artwork path has no ID segment")
        .to_string()
}

/// Add an artwork to the current session's cart.
async fn add_to_cart(ctx: &TestContext, artwork_id: &str) {
    let resp = ctx
        .client
        .post(ctx.url("/cart/add"))
        .form(&[
            ("kind", "artwork"),
            ("item_id", artwork_id),
            ("quantity", "1"),
        ])
        .send()
        .await
        .expect("Failed to add to cart");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/cart");
}

/// Submit the shipping step with a complete address.
async fn submit_shipping(ctx: &TestContext) {
    let resp = ctx
        .client
        .post(ctx.url("/checkout/shipping"))
        .form(&[
            ("full_name", "Integration Tester"),
            ("address_line", "1 Example Lane"),
            ("city", "Testville"),
            ("postal_code", "12345"),
        ])
        .send()
        .await
        .expect("Failed to submit shipping");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/checkout");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_cart_requires_login() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to load cart");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_cart_add_update_remove() {
    let artwork_id = listed_artwork_id("30.00").await;

    let ctx = TestContext::new();
    ctx.register_user(false).await;
    add_to_cart(&ctx, &artwork_id).await;

    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to load cart")
        .text()
        .await
        .expect("Failed to read cart");
    assert!(body.contains("Checkout flow piece"));
    assert!(body.contains("30.00"));

    // Adding again folds into the same line
    add_to_cart(&ctx, &artwork_id).await;
    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to load cart")
        .text()
        .await
        .expect("Failed to read cart");
    assert!(body.contains("value=\"2\""));

    // Count endpoint reflects the quantity
    let count = ctx
        .client
        .get(ctx.url("/cart/count"))
        .send()
        .await
        .expect("Failed to get cart count")
        .text()
        .await
        .expect("Failed to read cart count");
    assert_eq!(count.trim(), "2");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_checkout_with_empty_cart_bounces_to_cart() {
    let ctx = TestContext::new();
    ctx.register_user(false).await;

    let resp = ctx
        .client
        .get(ctx.url("/checkout"))
        .send()
        .await
        .expect("Failed to load checkout");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/cart");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_incomplete_address_rejected() {
    let artwork_id = listed_artwork_id("15.00").await;

    let ctx = TestContext::new();
    ctx.register_user(false).await;
    add_to_cart(&ctx, &artwork_id).await;

    let resp = ctx
        .client
        .post(ctx.url("/checkout/shipping"))
        .form(&[
            ("full_name", "Integration Tester"),
            ("address_line", ""),
            ("city", "Testville"),
            ("postal_code", "12345"),
        ])
        .send()
        .await
        .expect("Failed to submit shipping");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/checkout?error=incomplete_address");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_successful_card_checkout() {
    let artwork_id = listed_artwork_id("60.00").await;

    let ctx = TestContext::new();
    ctx.register_user(false).await;
    add_to_cart(&ctx, &artwork_id).await;
    submit_shipping(&ctx).await;

    let resp = ctx
        .client
        .post(ctx.url("/checkout/payment"))
        .form(&[
            ("method", "card"),
            ("card_number", "4242 4242 4242 4242"),
            ("upi_id", ""),
        ])
        .send()
        .await
        .expect("Failed to submit payment");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/checkout");

    // Confirmation page shows the paid order
    let body = ctx
        .client
        .get(ctx.url("/checkout"))
        .send()
        .await
        .expect("Failed to load confirmation")
        .text()
        .await
        .expect("Failed to read confirmation");
    assert!(body.contains("Thank you for your order"));
    assert!(body.contains("Paid"));

    // The cart was cleared by the purchase
    let resp = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to load cart");
    let body = resp.text().await.expect("Failed to read cart");
    assert!(body.contains("Your cart is empty"));

    // And the order shows up in history
    let body = ctx
        .client
        .get(ctx.url("/account/orders"))
        .send()
        .await
        .expect("Failed to load orders")
        .text()
        .await
        .expect("Failed to read orders");
    assert!(body.contains("Checkout flow piece"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_declined_card_keeps_cart() {
    let artwork_id = listed_artwork_id("25.00").await;

    let ctx = TestContext::new();
    ctx.register_user(false).await;
    add_to_cart(&ctx, &artwork_id).await;
    submit_shipping(&ctx).await;

    // The gateway declines card numbers ending in 0000
    let resp = ctx
        .client
        .post(ctx.url("/checkout/payment"))
        .form(&[
            ("method", "card"),
            ("card_number", "4242 4242 4242 0000"),
            ("upi_id", ""),
        ])
        .send()
        .await
        .expect("Failed to submit payment");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/checkout?error=payment_declined");

    // Cart contents survive the decline so the buyer can retry
    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to load cart")
        .text()
        .await
        .expect("Failed to read cart");
    assert!(body.contains("Checkout flow piece"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_invalid_upi_id_is_bad_request() {
    let artwork_id = listed_artwork_id("12.00").await;

    let ctx = TestContext::new();
    ctx.register_user(false).await;
    add_to_cart(&ctx, &artwork_id).await;
    submit_shipping(&ctx).await;

    let resp = ctx
        .client
        .post(ctx.url("/checkout/payment"))
        .form(&[("method", "upi"), ("card_number", ""), ("upi_id", "no-at-sign")])
        .send()
        .await
        .expect("Failed to submit payment");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_cash_on_delivery_places_order() {
    let artwork_id = listed_artwork_id("18.00").await;

    let ctx = TestContext::new();
    ctx.register_user(false).await;
    add_to_cart(&ctx, &artwork_id).await;
    submit_shipping(&ctx).await;

    let resp = ctx
        .client
        .post(ctx.url("/checkout/payment"))
        .form(&[("method", "cod"), ("card_number", ""), ("upi_id", "")])
        .send()
        .await
        .expect("Failed to submit payment");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/checkout");

    let body = ctx
        .client
        .get(ctx.url("/checkout"))
        .send()
        .await
        .expect("Failed to load confirmation")
        .text()
        .await
        .expect("Failed to read confirmation");
    assert!(body.contains("Placed"));
}
