//! Artwork repository.
//!
//! Artworks are soft-deleted: `delete` sets `status = 'deleted'` and every
//! listing query filters deleted rows out. The row is kept so order history
//! can still name the piece.

use rust_decimal::Decimal;
use sqlx::PgPool;

use craftloom_core::{ArtworkId, ListingStatus, UserId};

use super::RepositoryError;
use crate::models::Artwork;

const ARTWORK_COLUMNS: &str = "a.id, a.artist_id, u.username AS artist_name, a.title, \
     a.description, a.price, a.medium, a.image_path, a.status, a.created_at, a.updated_at";

/// Fields for creating or updating an artwork.
#[derive(Debug)]
pub struct ArtworkInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: Decimal,
    pub medium: &'a str,
    pub image_path: Option<&'a str>,
}

/// Repository for artwork database operations.
pub struct ArtworkRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtworkRepository<'a> {
    /// Create a new artwork repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all non-deleted artworks, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Artwork>, RepositoryError> {
        let rows = sqlx::query_as::<_, Artwork>(&format!(
            "SELECT {ARTWORK_COLUMNS}
             FROM artworks a
             JOIN users u ON u.id = a.artist_id
             WHERE a.status <> 'deleted'
             ORDER BY a.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List a single artist's non-deleted artworks, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_artist(&self, artist_id: UserId) -> Result<Vec<Artwork>, RepositoryError> {
        let rows = sqlx::query_as::<_, Artwork>(&format!(
            "SELECT {ARTWORK_COLUMNS}
             FROM artworks a
             JOIN users u ON u.id = a.artist_id
             WHERE a.artist_id = $1 AND a.status <> 'deleted'
             ORDER BY a.created_at DESC"
        ))
        .bind(artist_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a non-deleted artwork by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ArtworkId) -> Result<Option<Artwork>, RepositoryError> {
        let row = sqlx::query_as::<_, Artwork>(&format!(
            "SELECT {ARTWORK_COLUMNS}
             FROM artworks a
             JOIN users u ON u.id = a.artist_id
             WHERE a.id = $1 AND a.status <> 'deleted'"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Create a new artwork for an artist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        artist_id: UserId,
        input: &ArtworkInput<'_>,
    ) -> Result<ArtworkId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ArtworkId>(
            "INSERT INTO artworks (artist_id, title, description, price, medium, image_path)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(artist_id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.price)
        .bind(input.medium)
        .bind(input.image_path)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Update an artwork owned by `artist_id`.
    ///
    /// A `NULL` `image_path` input keeps the existing image.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist or
    /// belongs to another artist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ArtworkId,
        artist_id: UserId,
        input: &ArtworkInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE artworks
             SET title = $1, description = $2, price = $3, medium = $4,
                 image_path = COALESCE($5, image_path), updated_at = NOW()
             WHERE id = $6 AND artist_id = $7 AND status <> 'deleted'",
        )
        .bind(input.title)
        .bind(input.description)
        .bind(input.price)
        .bind(input.medium)
        .bind(input.image_path)
        .bind(id)
        .bind(artist_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Update an artwork's lifecycle status (e.g. mark sold).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist or
    /// belongs to another artist.
    pub async fn set_status(
        &self,
        id: ArtworkId,
        artist_id: UserId,
        status: ListingStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE artworks
             SET status = $1, updated_at = NOW()
             WHERE id = $2 AND artist_id = $3",
        )
        .bind(status)
        .bind(id)
        .bind(artist_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Soft-delete an artwork owned by `artist_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist or
    /// belongs to another artist.
    pub async fn delete(&self, id: ArtworkId, artist_id: UserId) -> Result<(), RepositoryError> {
        self.set_status(id, artist_id, ListingStatus::Deleted).await
    }
}
