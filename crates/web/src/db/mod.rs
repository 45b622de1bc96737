//! Database operations for the marketplace `PostgreSQL` database.
//!
//! # Tables
//!
//! - `users` - Site authentication and profiles
//! - `sessions` - Tower-sessions storage
//! - `artworks`, `materials`, `tutorials`, `blogs`, `portfolios` - Catalog
//! - `cart_items` - Per-user shopping cart rows
//! - `orders`, `order_items`, `payment_transactions` - Purchase records
//!
//! All queries use the sqlx runtime API (`query_as` with `FromRow` row
//! structs); rows that need parsing convert into domain models via `TryFrom`.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p craftloom-cli -- migrate
//! ```

pub mod artworks;
pub mod blogs;
pub mod cart;
pub mod materials;
pub mod orders;
pub mod portfolios;
pub mod tutorials;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use artworks::ArtworkRepository;
pub use blogs::BlogRepository;
pub use cart::CartRepository;
pub use materials::MaterialRepository;
pub use orders::OrderRepository;
pub use portfolios::PortfolioRepository;
pub use tutorials::TutorialRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g. unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
