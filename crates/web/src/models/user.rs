//! User model.

use chrono::{DateTime, Utc};

use craftloom_core::{Email, UserId, Username};

/// A registered user.
///
/// Password hashes live in the `users` table but never leave the db layer;
/// the model carries only what pages are allowed to see.
#[derive(Debug, Clone)]
pub struct User {
    /// User's database ID.
    pub id: UserId,
    /// Unique login name, also shown on public pages.
    pub username: Username,
    /// User's email address.
    pub email: Email,
    /// Optional display name shown instead of the username.
    pub display_name: Option<String>,
    /// Whether the user sells on the marketplace.
    pub is_artist: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
