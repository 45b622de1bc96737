//! Tutorial repository.

use sqlx::PgPool;

use craftloom_core::{SkillLevel, TutorialId, UserId};

use super::RepositoryError;
use crate::models::Tutorial;

const TUTORIAL_COLUMNS: &str = "t.id, t.author_id, u.username AS author_name, t.title, \
     t.body, t.skill_level, t.video_url, t.created_at, t.updated_at";

/// Fields for creating or updating a tutorial.
#[derive(Debug)]
pub struct TutorialInput<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub skill_level: SkillLevel,
    pub video_url: Option<&'a str>,
}

/// Repository for tutorial database operations.
pub struct TutorialRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TutorialRepository<'a> {
    /// Create a new tutorial repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all tutorials, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Tutorial>, RepositoryError> {
        let rows = sqlx::query_as::<_, Tutorial>(&format!(
            "SELECT {TUTORIAL_COLUMNS}
             FROM tutorials t
             JOIN users u ON u.id = t.author_id
             ORDER BY t.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a tutorial by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: TutorialId) -> Result<Option<Tutorial>, RepositoryError> {
        let row = sqlx::query_as::<_, Tutorial>(&format!(
            "SELECT {TUTORIAL_COLUMNS}
             FROM tutorials t
             JOIN users u ON u.id = t.author_id
             WHERE t.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Create a new tutorial.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        author_id: UserId,
        input: &TutorialInput<'_>,
    ) -> Result<TutorialId, RepositoryError> {
        let id = sqlx::query_scalar::<_, TutorialId>(
            "INSERT INTO tutorials (author_id, title, body, skill_level, video_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(author_id)
        .bind(input.title)
        .bind(input.body)
        .bind(input.skill_level)
        .bind(input.video_url)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Update a tutorial owned by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the tutorial doesn't exist or
    /// belongs to another author.
    pub async fn update(
        &self,
        id: TutorialId,
        author_id: UserId,
        input: &TutorialInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE tutorials
             SET title = $1, body = $2, skill_level = $3, video_url = $4, updated_at = NOW()
             WHERE id = $5 AND author_id = $6",
        )
        .bind(input.title)
        .bind(input.body)
        .bind(input.skill_level)
        .bind(input.video_url)
        .bind(id)
        .bind(author_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Hard-delete a tutorial owned by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the tutorial doesn't exist or
    /// belongs to another author.
    pub async fn delete(&self, id: TutorialId, author_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tutorials WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
