//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (DB ping)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Artworks
//! GET  /artworks               - Artwork listing
//! GET  /artworks/new           - New artwork form (requires auth)
//! POST /artworks               - Create artwork (multipart, requires auth)
//! GET  /artworks/{id}          - Artwork detail
//! GET  /artworks/{id}/edit     - Edit form (owner only)
//! POST /artworks/{id}          - Update artwork (owner only)
//! POST /artworks/{id}/delete   - Soft-delete artwork (owner only)
//!
//! # Materials (same shape as artworks, hard delete)
//! GET  /materials
//! GET  /materials/new
//! POST /materials
//! GET  /materials/{id}
//! GET  /materials/{id}/edit
//! POST /materials/{id}
//! POST /materials/{id}/delete
//!
//! # Tutorials (markdown body)
//! GET  /tutorials
//! GET  /tutorials/new
//! POST /tutorials
//! GET  /tutorials/{id}
//! GET  /tutorials/{id}/edit
//! POST /tutorials/{id}
//! POST /tutorials/{id}/delete
//!
//! # Blog (markdown body, drafts visible to author only)
//! GET  /blog
//! GET  /blog/new
//! POST /blog
//! GET  /blog/{id}
//! GET  /blog/{id}/edit
//! POST /blog/{id}
//! POST /blog/{id}/delete
//!
//! # Portfolios
//! GET  /portfolios             - Portfolio listing
//! GET  /portfolios/{id}        - Portfolio by artist user ID
//! GET  /portfolio/edit         - Edit own portfolio (requires auth)
//! POST /portfolio/edit         - Upsert own portfolio
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart page with totals
//! POST /cart/add               - Add a listing to the cart
//! POST /cart/update            - Update line quantity
//! POST /cart/remove            - Remove a line
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout (requires auth)
//! GET  /checkout               - Render the current wizard step
//! POST /checkout/shipping      - Store shipping address, advance to payment
//! POST /checkout/payment       - Charge and place the order
//! POST /checkout/back          - Step back
//! POST /checkout/reset         - Back to cart / continue shopping
//!
//! # Account (requires auth)
//! GET  /account/orders         - Order history with items
//! ```

pub mod account;
pub mod artworks;
pub mod auth;
pub mod blogs;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod materials;
pub mod portfolios;
pub mod tutorials;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router, rate-limited per IP.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the artwork routes router.
pub fn artwork_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(artworks::index).post(artworks::create))
        .route("/new", get(artworks::new_form))
        .route("/{id}", get(artworks::show).post(artworks::update))
        .route("/{id}/edit", get(artworks::edit_form))
        .route("/{id}/delete", post(artworks::delete))
}

/// Create the material routes router.
pub fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(materials::index).post(materials::create))
        .route("/new", get(materials::new_form))
        .route("/{id}", get(materials::show).post(materials::update))
        .route("/{id}/edit", get(materials::edit_form))
        .route("/{id}/delete", post(materials::delete))
}

/// Create the tutorial routes router.
pub fn tutorial_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(tutorials::index).post(tutorials::create))
        .route("/new", get(tutorials::new_form))
        .route("/{id}", get(tutorials::show).post(tutorials::update))
        .route("/{id}/edit", get(tutorials::edit_form))
        .route("/{id}/delete", post(tutorials::delete))
}

/// Create the blog routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::index).post(blogs::create))
        .route("/new", get(blogs::new_form))
        .route("/{id}", get(blogs::show).post(blogs::update))
        .route("/{id}/edit", get(blogs::edit_form))
        .route("/{id}/delete", post(blogs::delete))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/shipping", post(checkout::submit_shipping))
        .route("/payment", post(checkout::submit_payment))
        .route("/back", post(checkout::back))
        .route("/reset", post(checkout::reset))
}

/// Create all routes for the marketplace.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .nest("/artworks", artwork_routes())
        .nest("/materials", material_routes())
        .nest("/tutorials", tutorial_routes())
        .nest("/blog", blog_routes())
        // Portfolios
        .route("/portfolios", get(portfolios::index))
        .route("/portfolios/{id}", get(portfolios::show))
        .route(
            "/portfolio/edit",
            get(portfolios::edit_form).post(portfolios::update),
        )
        // Cart and checkout
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        // Account
        .route("/account/orders", get(account::orders))
        // Auth
        .nest("/auth", auth_routes())
}
