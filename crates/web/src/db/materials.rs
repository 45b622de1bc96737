//! Material repository.
//!
//! Unlike artworks, materials are hard-deleted.

use rust_decimal::Decimal;
use sqlx::PgPool;

use craftloom_core::{MaterialId, UserId};

use super::RepositoryError;
use crate::models::Material;

const MATERIAL_COLUMNS: &str = "m.id, m.seller_id, u.username AS seller_name, m.name, \
     m.description, m.price, m.quantity_available, m.category, m.image_path, \
     m.created_at, m.updated_at";

/// Fields for creating or updating a material.
#[derive(Debug)]
pub struct MaterialInput<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: Decimal,
    pub quantity_available: i32,
    pub category: &'a str,
    pub image_path: Option<&'a str>,
}

/// Repository for material database operations.
pub struct MaterialRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MaterialRepository<'a> {
    /// Create a new material repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all materials, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Material>, RepositoryError> {
        let rows = sqlx::query_as::<_, Material>(&format!(
            "SELECT {MATERIAL_COLUMNS}
             FROM materials m
             JOIN users u ON u.id = m.seller_id
             ORDER BY m.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a material by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: MaterialId) -> Result<Option<Material>, RepositoryError> {
        let row = sqlx::query_as::<_, Material>(&format!(
            "SELECT {MATERIAL_COLUMNS}
             FROM materials m
             JOIN users u ON u.id = m.seller_id
             WHERE m.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Create a new material for a seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        seller_id: UserId,
        input: &MaterialInput<'_>,
    ) -> Result<MaterialId, RepositoryError> {
        let id = sqlx::query_scalar::<_, MaterialId>(
            "INSERT INTO materials
                 (seller_id, name, description, price, quantity_available, category, image_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(seller_id)
        .bind(input.name)
        .bind(input.description)
        .bind(input.price)
        .bind(input.quantity_available)
        .bind(input.category)
        .bind(input.image_path)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Update a material owned by `seller_id`.
    ///
    /// A `NULL` `image_path` input keeps the existing image.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the material doesn't exist or
    /// belongs to another seller.
    pub async fn update(
        &self,
        id: MaterialId,
        seller_id: UserId,
        input: &MaterialInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE materials
             SET name = $1, description = $2, price = $3, quantity_available = $4,
                 category = $5, image_path = COALESCE($6, image_path), updated_at = NOW()
             WHERE id = $7 AND seller_id = $8",
        )
        .bind(input.name)
        .bind(input.description)
        .bind(input.price)
        .bind(input.quantity_available)
        .bind(input.category)
        .bind(input.image_path)
        .bind(id)
        .bind(seller_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Hard-delete a material owned by `seller_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the material doesn't exist or
    /// belongs to another seller.
    pub async fn delete(&self, id: MaterialId, seller_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1 AND seller_id = $2")
            .bind(id)
            .bind(seller_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
