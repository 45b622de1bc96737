//! Blog post repository.

use sqlx::PgPool;

use craftloom_core::{BlogId, UserId};

use super::RepositoryError;
use crate::models::Blog;

const BLOG_COLUMNS: &str = "b.id, b.author_id, u.username AS author_name, b.title, \
     b.body, b.published, b.created_at, b.updated_at";

/// Fields for creating or updating a blog post.
#[derive(Debug)]
pub struct BlogInput<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub published: bool,
}

/// Repository for blog post database operations.
pub struct BlogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BlogRepository<'a> {
    /// Create a new blog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List published posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published(&self) -> Result<Vec<Blog>, RepositoryError> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS}
             FROM blogs b
             JOIN users u ON u.id = b.author_id
             WHERE b.published
             ORDER BY b.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List all posts by an author, drafts included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_author(&self, author_id: UserId) -> Result<Vec<Blog>, RepositoryError> {
        let rows = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS}
             FROM blogs b
             JOIN users u ON u.id = b.author_id
             WHERE b.author_id = $1
             ORDER BY b.created_at DESC"
        ))
        .bind(author_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BlogId) -> Result<Option<Blog>, RepositoryError> {
        let row = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS}
             FROM blogs b
             JOIN users u ON u.id = b.author_id
             WHERE b.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Create a new post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        author_id: UserId,
        input: &BlogInput<'_>,
    ) -> Result<BlogId, RepositoryError> {
        let id = sqlx::query_scalar::<_, BlogId>(
            "INSERT INTO blogs (author_id, title, body, published)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(author_id)
        .bind(input.title)
        .bind(input.body)
        .bind(input.published)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Update a post owned by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist or
    /// belongs to another author.
    pub async fn update(
        &self,
        id: BlogId,
        author_id: UserId,
        input: &BlogInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE blogs
             SET title = $1, body = $2, published = $3, updated_at = NOW()
             WHERE id = $4 AND author_id = $5",
        )
        .bind(input.title)
        .bind(input.body)
        .bind(input.published)
        .bind(id)
        .bind(author_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Hard-delete a post owned by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist or
    /// belongs to another author.
    pub async fn delete(&self, id: BlogId, author_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1 AND author_id = $2")
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
