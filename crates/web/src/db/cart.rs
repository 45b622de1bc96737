//! Shopping cart repository.
//!
//! Each cart line snapshots the listing's title and unit price at the
//! time it was added, so later edits to the listing don't change what
//! the shopper agreed to pay.

use rust_decimal::Decimal;
use sqlx::PgPool;

use craftloom_core::{CartItemId, ItemKind, UserId};

use super::RepositoryError;
use crate::models::CartItem;

const CART_COLUMNS: &str = "id, user_id, kind, item_id, title, unit_price, quantity, added_at";

/// Repository for shopping cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's cart lines, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_COLUMNS}
             FROM cart_items
             WHERE user_id = $1
             ORDER BY added_at"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Count the items in a user's cart (sum of line quantities).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, user_id: UserId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(quantity), 0) FROM cart_items WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Add a listing to the cart, incrementing the quantity if the same
    /// listing is already present.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn add(
        &self,
        user_id: UserId,
        kind: ItemKind,
        item_id: i32,
        title: &str,
        unit_price: Decimal,
        quantity: i32,
    ) -> Result<CartItemId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CartItemId>(
            "INSERT INTO cart_items (user_id, kind, item_id, title, unit_price, quantity)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id, kind, item_id) DO UPDATE
             SET quantity = cart_items.quantity + EXCLUDED.quantity
             RETURNING id",
        )
        .bind(user_id)
        .bind(kind)
        .bind(item_id)
        .bind(title)
        .bind(unit_price)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Set the quantity of one of the user's cart lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist or
    /// belongs to another user.
    pub async fn set_quantity(
        &self,
        id: CartItemId,
        user_id: UserId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE cart_items
             SET quantity = $1
             WHERE id = $2 AND user_id = $3",
        )
        .bind(quantity)
        .bind(id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove one of the user's cart lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist or
    /// belongs to another user.
    pub async fn remove(&self, id: CartItemId, user_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Empty the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
