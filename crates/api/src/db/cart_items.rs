//! Cart item repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use polostore_core::{CartItemId, ProductId};

use super::RepositoryError;
use crate::models::CartItem;

const SELECT_COLUMNS: &str =
    "SELECT id, product_id, quantity, size, color, session_id, created_at FROM cart_items";

/// Repository for cart item database operations.
pub struct CartItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartItemRepository<'a> {
    /// Create a new cart item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a cart item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(item)
    }

    /// List the cart for an anonymous session, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(&format!(
            "{SELECT_COLUMNS} WHERE session_id = ? ORDER BY created_at DESC"
        ))
        .bind(session_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// List cart items referencing a product, across all sessions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(&format!(
            "{SELECT_COLUMNS} WHERE product_id = ? ORDER BY created_at DESC"
        ))
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Add a line item to a cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        product_id: ProductId,
        quantity: i64,
        size: &str,
        color: &str,
        session_id: &str,
    ) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            INSERT INTO cart_items (product_id, quantity, size, color, session_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, product_id, quantity, size, color, session_id, created_at
            ",
        )
        .bind(product_id)
        .bind(quantity)
        .bind(size)
        .bind(color)
        .bind(session_id)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }

    /// Update a line item's quantity, size, and/or color.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: CartItemId,
        quantity: Option<i64>,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            UPDATE cart_items SET
                quantity = COALESCE(?, quantity),
                size = COALESCE(?, size),
                color = COALESCE(?, color)
            WHERE id = ?
            RETURNING id, product_id, quantity, size, color, session_id, created_at
            ",
        )
        .bind(quantity)
        .bind(size)
        .bind(color)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(item)
    }

    /// Remove a single line item.
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: CartItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
