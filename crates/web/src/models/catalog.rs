//! Catalog models: artworks, materials, tutorials, blogs, portfolios, cart rows.
//!
//! These derive `sqlx::FromRow` directly - every column maps without parsing,
//! so no intermediate row types are needed. Listing queries join the owner's
//! username in as `artist_name` / `author_name` for display.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use craftloom_core::{
    ArtworkId, BlogId, CartItemId, ItemKind, ListingStatus, MaterialId, PortfolioId, SkillLevel,
    TutorialId, UserId,
};

/// An artwork listing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Artwork {
    pub id: ArtworkId,
    pub artist_id: UserId,
    /// Username of the artist (joined from `users`).
    pub artist_name: String,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    /// Medium, e.g. "watercolor" or "ceramic".
    pub medium: String,
    /// Relative path under the uploads directory, if an image was uploaded.
    pub image_path: Option<String>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A craft material listing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Material {
    pub id: MaterialId,
    pub seller_id: UserId,
    /// Username of the seller (joined from `users`).
    pub seller_name: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity_available: i32,
    /// Category, e.g. "yarn" or "clay".
    pub category: String,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A tutorial with a markdown body.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tutorial {
    pub id: TutorialId,
    pub author_id: UserId,
    /// Username of the author (joined from `users`).
    pub author_name: String,
    pub title: String,
    /// Markdown source; rendered with comrak at display time.
    pub body: String,
    pub skill_level: SkillLevel,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A blog post with a markdown body.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Blog {
    pub id: BlogId,
    pub author_id: UserId,
    /// Username of the author (joined from `users`).
    pub author_name: String,
    pub title: String,
    /// Markdown source; rendered with comrak at display time.
    pub body: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A per-artist portfolio (bio/website record, separate from their listings).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Portfolio {
    pub id: PortfolioId,
    pub artist_id: UserId,
    /// Username of the artist (joined from `users`).
    pub artist_name: String,
    pub bio: String,
    pub website: Option<String>,
    pub specialty: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A cart row: one catalog item pending purchase by a user.
///
/// Title and unit price are snapshots taken when the item was added, so a
/// later edit to the listing does not change what the buyer agreed to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub kind: ItemKind,
    /// ID of the artwork or material this row refers to.
    pub item_id: i32,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Line total for this row.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
