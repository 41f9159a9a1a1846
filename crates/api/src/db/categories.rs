//! Category repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use polostore_core::CategoryId;

use super::RepositoryError;
use crate::models::Category;

const SELECT_COLUMNS: &str = "SELECT id, name, slug, description, created_at FROM categories";

/// Derive a URL-safe slug from a category name.
///
/// Lowercases, collapses whitespace runs into single hyphens, and strips
/// everything outside `[a-z0-9-]`.
#[must_use]
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase()
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(category)
    }

    /// List all categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories =
            sqlx::query_as::<_, Category>(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC"))
                .fetch_all(self.pool)
                .await?;

        Ok(categories)
    }

    /// Insert a new category, deriving its slug from the name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a category with the same slug
    /// already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, RepositoryError> {
        let slug = generate_slug(name);

        let category = sqlx::query_as::<_, Category>(
            r"
            INSERT INTO categories (name, slug, description, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, slug, description, created_at
            ",
        )
        .bind(name)
        .bind(&slug)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("category with this name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(category)
    }

    /// Update a category's name and/or description; the slug follows the name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist.
    /// Returns `RepositoryError::Conflict` if the new name collides with an
    /// existing slug.
    pub async fn update(
        &self,
        id: CategoryId,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Category, RepositoryError> {
        let slug = name.map(generate_slug);

        let category = sqlx::query_as::<_, Category>(
            r"
            UPDATE categories SET
                name = COALESCE(?, name),
                slug = COALESCE(?, slug),
                description = COALESCE(?, description)
            WHERE id = ?
            RETURNING id, name, slug, description, created_at
            ",
        )
        .bind(name)
        .bind(&slug)
        .bind(description)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("category with this name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        Ok(category)
    }

    /// Delete a category by ID.
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
