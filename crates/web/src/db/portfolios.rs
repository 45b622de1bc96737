//! Artist portfolio repository.

use sqlx::PgPool;

use craftloom_core::{PortfolioId, UserId};

use super::RepositoryError;
use crate::models::Portfolio;

const PORTFOLIO_COLUMNS: &str = "p.id, p.artist_id, u.username AS artist_name, p.bio, \
     p.website, p.specialty, p.created_at, p.updated_at";

/// Fields for creating or updating a portfolio.
#[derive(Debug)]
pub struct PortfolioInput<'a> {
    pub bio: &'a str,
    pub website: Option<&'a str>,
    pub specialty: Option<&'a str>,
}

/// Repository for artist portfolio database operations.
pub struct PortfolioRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PortfolioRepository<'a> {
    /// Create a new portfolio repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all portfolios, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Portfolio>, RepositoryError> {
        let rows = sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS}
             FROM portfolios p
             JOIN users u ON u.id = p.artist_id
             ORDER BY p.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a portfolio by its artist's user ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_artist(
        &self,
        artist_id: UserId,
    ) -> Result<Option<Portfolio>, RepositoryError> {
        let row = sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS}
             FROM portfolios p
             JOIN users u ON u.id = p.artist_id
             WHERE p.artist_id = $1"
        ))
        .bind(artist_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Create or replace the portfolio for an artist.
    ///
    /// Each artist has at most one portfolio, so an existing row is
    /// updated in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(
        &self,
        artist_id: UserId,
        input: &PortfolioInput<'_>,
    ) -> Result<PortfolioId, RepositoryError> {
        let id = sqlx::query_scalar::<_, PortfolioId>(
            "INSERT INTO portfolios (artist_id, bio, website, specialty)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (artist_id) DO UPDATE
             SET bio = EXCLUDED.bio,
                 website = EXCLUDED.website,
                 specialty = EXCLUDED.specialty,
                 updated_at = NOW()
             RETURNING id",
        )
        .bind(artist_id)
        .bind(input.bio)
        .bind(input.website)
        .bind(input.specialty)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
